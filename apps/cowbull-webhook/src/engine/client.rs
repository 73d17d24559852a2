//! HTTP client for the cowbull game engine.
//!
//! Every response goes through the same status mapping:
//!
//! | outcome                      | result                     |
//! |------------------------------|----------------------------|
//! | connection failure / timeout | `ServiceUnavailable`       |
//! | 200                          | body decoded               |
//! | 404                          | `ServiceUnavailable`       |
//! | 400                          | `EngineRejected`           |
//! | anything else                | `GenericEngine` + status   |

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::dto::{rejection_text, GuessRequest, GuessResponseBody, ModeEntry, NewGameBody};
use super::trait_def::GameEngine;
use crate::config::{EngineConfig, EngineEndpoints};
use crate::domain::{GameKey, GameState, GuessOutcome};
use crate::error::AppError;

const NOT_FOUND_TEXT: &str =
    "The game engine reported a 404 (not found) error. The service may be temporarily unavailable";

/// Shared, immutable engine client. Safe to use from any number of turns at
/// once: it holds a connection pool and the resolved URLs, nothing else.
#[derive(Debug, Clone)]
pub struct CowbullClient {
    http: reqwest::Client,
    endpoints: EngineEndpoints,
}

impl CowbullClient {
    pub fn new(config: &EngineConfig) -> Result<Self, AppError> {
        let endpoints = config.endpoints()?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &EngineEndpoints {
        &self.endpoints
    }

    async fn send(&self, op: &'static str, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await.map_err(|e| {
            warn!(op, error = %e, "game engine unreachable");
            AppError::unavailable(format!("Game reported an error: {e}"))
        })?;
        check_status(op, response).await
    }
}

async fn check_status(op: &'static str, response: Response) -> Result<Response, AppError> {
    let status = response.status();
    match status {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => {
            warn!(op, status = status.as_u16(), "game engine not found");
            Err(AppError::unavailable(NOT_FOUND_TEXT))
        }
        StatusCode::BAD_REQUEST => {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(op, error = %e, "failed to read game engine rejection body");
                String::new()
            });
            debug!(op, status = status.as_u16(), body = %body, "game engine rejected request");
            Err(AppError::engine_rejected(rejection_text(&body)))
        }
        other => {
            warn!(op, status = other.as_u16(), "game engine returned unexpected status");
            Err(AppError::engine_status(other.as_u16()))
        }
    }
}

async fn decode<T: DeserializeOwned>(op: &'static str, response: Response) -> Result<T, AppError> {
    let body = response.bytes().await.map_err(|e| {
        warn!(op, error = %e, "failed to read game engine response");
        AppError::unavailable(format!("Game reported an error: {e}"))
    })?;
    serde_json::from_slice::<T>(&body).map_err(|e| {
        warn!(op, error = %e, body_size = body.len(), "undecodable game engine response");
        AppError::malformed_engine_response(e.to_string())
    })
}

#[async_trait]
impl GameEngine for CowbullClient {
    async fn fetch_modes(&self) -> Result<Vec<String>, AppError> {
        let mut request = self.http.get(self.endpoints.modes.clone());
        if self.endpoints.mode_query_on_list {
            request = request.query(&[("mode", "")]);
        }
        debug!(url = %self.endpoints.modes, "fetching game modes");

        let response = self.send("fetch_modes", request).await?;
        let entries: Vec<ModeEntry> = decode("fetch_modes", response).await?;
        Ok(entries.into_iter().map(|e| e.mode).collect())
    }

    async fn start_game(&self, mode: &str) -> Result<GameState, AppError> {
        let request = self
            .http
            .get(self.endpoints.game.clone())
            .query(&[("mode", mode)]);
        debug!(url = %self.endpoints.game, mode, "starting game");

        let response = self.send("start_game", request).await?;
        let body: NewGameBody = decode("start_game", response).await?;
        let state = GameState::from(body);
        info!(
            mode,
            key = %state.key.redacted(),
            digits = state.digits_required,
            guesses = state.guesses_remaining,
            "game started"
        );
        Ok(state)
    }

    async fn submit_guess(
        &self,
        key: &str,
        digits_required: usize,
        digits: &[i64],
    ) -> Result<GuessOutcome, AppError> {
        if digits_required == 0 {
            return Err(AppError::invalid(
                "The digits required are zero, so a guess cannot be made.",
            ));
        }
        if digits.len() != digits_required {
            return Err(AppError::invalid(format!(
                "There must be {digits_required} and only {digits_required} digits"
            )));
        }

        let payload = GuessRequest { key, digits };
        debug!(
            url = %self.endpoints.game,
            key = %GameKey::new(key).redacted(),
            ?digits,
            "submitting guess"
        );
        let request = self.http.post(self.endpoints.game.clone()).json(&payload);

        let response = self.send("submit_guess", request).await?;
        let body: GuessResponseBody = decode("submit_guess", response).await?;
        Ok(body.into_outcome(key, digits_required))
    }
}
