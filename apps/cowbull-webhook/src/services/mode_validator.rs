//! Checks a requested game mode against the list the engine advertises.
//!
//! The list is fetched on every call and the outcome is returned to the
//! caller; nothing is remembered between calls.

use std::fmt;

use tracing::{debug, warn};

use crate::engine::GameEngine;
use crate::error::AppError;

pub const DEFAULT_MODE: &str = "normal";

/// A mode the engine confirmed it supports, valid for the current turn only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMode(String);

impl SelectedMode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Absent or empty requests fall back to [`DEFAULT_MODE`].
pub fn normalize(requested: Option<&str>) -> &str {
    match requested {
        Some(mode) if !mode.is_empty() => mode,
        _ => DEFAULT_MODE,
    }
}

pub async fn validate(
    engine: &dyn GameEngine,
    requested: Option<&str>,
) -> Result<SelectedMode, AppError> {
    let mode = normalize(requested);
    debug!(mode, "validating game mode");

    let available = engine.fetch_modes().await?;
    if available.iter().any(|m| m == mode) {
        Ok(SelectedMode(mode.to_string()))
    } else {
        warn!(mode, ?available, "requested mode not offered by engine");
        Err(AppError::invalid_mode(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::stub_engine::{EngineCall, StubEngine};

    #[tokio::test]
    async fn default_mode_is_normal() {
        let engine = StubEngine::new().with_modes(["easy", "normal"]);
        let selected = validate(&engine, None).await.unwrap();
        assert_eq!(selected.as_str(), "normal");

        let selected = validate(&engine, Some("")).await.unwrap();
        assert_eq!(selected.as_str(), "normal");
    }

    #[tokio::test]
    async fn normal_is_rejected_when_not_offered() {
        let engine = StubEngine::new().with_modes(["easy", "hard"]);
        let err = validate(&engine, Some("normal")).await.unwrap_err();
        assert_eq!(err, AppError::invalid_mode("normal"));
    }

    #[tokio::test]
    async fn match_is_exact_not_substring() {
        let engine = StubEngine::new().with_modes(["normal", "hard"]);
        assert!(validate(&engine, Some("norm")).await.is_err());
        assert!(validate(&engine, Some("Normal")).await.is_err());
    }

    #[tokio::test]
    async fn mode_list_is_fetched_on_every_call() {
        let engine = StubEngine::new().with_modes(["normal"]);
        validate(&engine, None).await.unwrap();
        validate(&engine, Some("normal")).await.unwrap();
        let _ = validate(&engine, Some("hard")).await;
        assert_eq!(
            engine.calls(),
            vec![EngineCall::FetchModes; 3],
            "every validation must fetch a fresh list"
        );
    }

    #[tokio::test]
    async fn fetch_failure_propagates_unchanged() {
        let engine = StubEngine::new().failing_modes(AppError::unavailable("down"));
        let err = validate(&engine, Some("easy")).await.unwrap_err();
        assert_eq!(err, AppError::unavailable("down"));

        let engine = StubEngine::new().failing_modes(AppError::engine_rejected("nope"));
        let err = validate(&engine, Some("easy")).await.unwrap_err();
        assert_eq!(err, AppError::engine_rejected("nope"));
    }

    #[tokio::test]
    async fn concurrent_validations_do_not_share_selection() {
        let engine = StubEngine::new().with_modes(["easy", "normal", "hard"]);
        let (a, b, c) = tokio::join!(
            validate(&engine, Some("easy")),
            validate(&engine, Some("hard")),
            validate(&engine, Some("impossible")),
        );
        assert_eq!(a.unwrap().as_str(), "easy");
        assert_eq!(b.unwrap().as_str(), "hard");
        assert_eq!(c.unwrap_err(), AppError::invalid_mode("impossible"));

        // A failed validation leaves nothing behind for the next one.
        assert_eq!(validate(&engine, None).await.unwrap().as_str(), "normal");
    }
}
