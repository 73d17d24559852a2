//! Game engine trait definition.

use async_trait::async_trait;

use crate::domain::{GameState, GuessOutcome};
use crate::error::AppError;

/// The three operations the remote engine offers.
///
/// Implementations hold no per-call state: one instance is shared by every
/// in-flight turn. Each call is a single attempt; nothing is retried.
#[async_trait]
pub trait GameEngine: Send + Sync {
    /// Modes the engine currently advertises. Never cached.
    async fn fetch_modes(&self) -> Result<Vec<String>, AppError>;

    /// Start a game in `mode`.
    async fn start_game(&self, mode: &str) -> Result<GameState, AppError>;

    /// Submit a guess for the game identified by `key`.
    ///
    /// Fails with `AppError::Validation` without touching the network when
    /// `digits.len() != digits_required`.
    async fn submit_guess(
        &self,
        key: &str,
        digits_required: usize,
        digits: &[i64],
    ) -> Result<GuessOutcome, AppError>;
}
