//! Domain layer: game and intent types, free of HTTP and engine wire details.

pub mod game;
pub mod intent;

pub use game::{DigitResult, GameKey, GameState, GameStatus, GuessAnalysis, GuessOutcome};
pub use intent::{Action, IntentRequest};
