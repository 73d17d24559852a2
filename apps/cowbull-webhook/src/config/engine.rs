//! Game engine connection settings.
//!
//! Read once at startup from `COWBULL_URL` (required) and
//! `COWBULL_TIMEOUT_SECS` (optional). `COWBULL_URL` is either a plain base URL
//! or a template containing `{}`, which is filled with `game` or `modes`
//! depending on the operation.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::AppError;

pub const URL_VAR: &str = "COWBULL_URL";
pub const TIMEOUT_VAR: &str = "COWBULL_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub url: String,
    /// Applied to both connect and whole-request time.
    pub timeout: Duration,
}

impl EngineConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::config(format!(
                    "Required environment variable '{URL_VAR}' is not set"
                ))
            })?;

        let timeout = match lookup(TIMEOUT_VAR) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "{TIMEOUT_VAR} must be a positive number of seconds, got '{raw}'"
                    )))
                }
            },
        };

        let config = Self { url, timeout };
        config.endpoints()?;
        Ok(config)
    }

    /// Resolve the concrete URLs for each engine operation.
    pub fn endpoints(&self) -> Result<EngineEndpoints, AppError> {
        if self.url.contains(PLACEHOLDER) {
            Ok(EngineEndpoints {
                game: parse_url(&self.url.replace(PLACEHOLDER, "game"))?,
                modes: parse_url(&self.url.replace(PLACEHOLDER, "modes"))?,
                mode_query_on_list: false,
            })
        } else {
            let base = parse_url(&self.url)?;
            Ok(EngineEndpoints {
                game: base.clone(),
                modes: base,
                mode_query_on_list: true,
            })
        }
    }
}

/// Concrete engine URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEndpoints {
    pub game: Url,
    pub modes: Url,
    /// Plain base URLs list modes with `?mode=`; templated ones hit a
    /// dedicated modes resource instead.
    pub mode_query_on_list: bool,
}

fn parse_url(raw: &str) -> Result<Url, AppError> {
    Url::parse(raw).map_err(|e| AppError::config(format!("Invalid game engine URL '{raw}': {e}")))
}
