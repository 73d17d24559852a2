//! Turn handling: mode validation, turn-state threading, reply text, and the
//! dispatcher that drives them.

pub mod dispatcher;
pub mod mode_validator;
pub mod synthesizer;
pub mod turn_state;

pub use dispatcher::dispatch;
pub use mode_validator::SelectedMode;
pub use turn_state::TurnState;
