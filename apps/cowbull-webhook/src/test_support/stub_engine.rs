//! In-memory `GameEngine` with scripted answers and a call log.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{DigitResult, GameKey, GameState, GameStatus, GuessAnalysis, GuessOutcome};
use crate::engine::GameEngine;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    FetchModes,
    StartGame {
        mode: String,
    },
    SubmitGuess {
        key: String,
        digits_required: usize,
        digits: Vec<i64>,
    },
}

pub struct StubEngine {
    modes: Result<Vec<String>, AppError>,
    new_game: Result<GameState, AppError>,
    guess: Result<GuessOutcome, AppError>,
    calls: Mutex<Vec<EngineCall>>,
}

/// A four-digit, ten-guess game.
pub fn sample_game() -> GameState {
    GameState {
        key: GameKey::new("5f0c2a71-stub-key"),
        digits_required: 4,
        guesses_remaining: 10,
        status: GameStatus::InProgress,
        served_by: Some("stub-engine".to_string()),
    }
}

/// A scored four-digit guess; `message` is only meaningful for Won/Lost.
pub fn sample_outcome(status: GameStatus, guesses_remaining: u32) -> GuessOutcome {
    let message = match status {
        GameStatus::Won => "Congratulations, you won the game!",
        GameStatus::Lost => "Sorry, you lost! The answer was 1235.",
        GameStatus::InProgress => "",
    };
    let digit = |digit, is_bull, is_cow, occurs_multiple| DigitResult {
        digit,
        is_bull,
        is_cow,
        occurs_multiple,
    };
    let digits = vec![
        digit(1, true, true, false),
        digit(2, false, true, false),
        digit(3, false, false, false),
        digit(4, false, false, true),
    ];
    let game = sample_game();
    GuessOutcome {
        analysis: GuessAnalysis {
            digits,
            cow_count: 1,
            bull_count: 1,
            message: message.to_string(),
        },
        state: GameState {
            guesses_remaining,
            status,
            served_by: None,
            ..game
        },
    }
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            modes: Ok(vec!["easy".into(), "normal".into(), "hard".into()]),
            new_game: Ok(sample_game()),
            guess: Ok(sample_outcome(GameStatus::InProgress, 9)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = Ok(modes.into_iter().map(Into::into).collect());
        self
    }

    pub fn failing_modes(mut self, err: AppError) -> Self {
        self.modes = Err(err);
        self
    }

    pub fn with_new_game(mut self, state: GameState) -> Self {
        self.new_game = Ok(state);
        self
    }

    pub fn failing_new_game(mut self, err: AppError) -> Self {
        self.new_game = Err(err);
        self
    }

    pub fn with_guess(mut self, outcome: GuessOutcome) -> Self {
        self.guess = Ok(outcome);
        self
    }

    pub fn failing_guess(mut self, err: AppError) -> Self {
        self.guess = Err(err);
        self
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameEngine for StubEngine {
    async fn fetch_modes(&self) -> Result<Vec<String>, AppError> {
        self.record(EngineCall::FetchModes);
        self.modes.clone()
    }

    async fn start_game(&self, mode: &str) -> Result<GameState, AppError> {
        self.record(EngineCall::StartGame {
            mode: mode.to_string(),
        });
        self.new_game.clone()
    }

    // The call is logged before the length check so tests can tell whether a
    // caller let a bad guess through.
    async fn submit_guess(
        &self,
        key: &str,
        digits_required: usize,
        digits: &[i64],
    ) -> Result<GuessOutcome, AppError> {
        self.record(EngineCall::SubmitGuess {
            key: key.to_string(),
            digits_required,
            digits: digits.to_vec(),
        });
        if digits.len() != digits_required {
            return Err(AppError::invalid(format!(
                "There must be {digits_required} and only {digits_required} digits"
            )));
        }
        self.guess.clone()
    }
}
