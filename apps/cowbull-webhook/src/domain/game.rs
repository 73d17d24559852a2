use std::fmt;

/// Opaque session key minted by the engine.
///
/// Only ever forwarded back to the engine. `Debug` and [`GameKey::redacted`]
/// never print more than a short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct GameKey(String);

impl GameKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shows only the first 4 characters followed by asterisks.
    pub fn redacted(&self) -> String {
        match self.0.char_indices().nth(4) {
            Some((idx, _)) => format!("{}***", &self.0[..idx]),
            None => "*".repeat(self.0.chars().count()),
        }
    }
}

impl fmt::Debug for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GameKey").field(&self.redacted()).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Engine statuses are matched case-insensitively; anything that is not
    /// `won` or `lost` means the game is still running.
    pub fn from_engine(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("won") {
            GameStatus::Won
        } else if raw.eq_ignore_ascii_case("lost") {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub key: GameKey,
    pub digits_required: usize,
    pub guesses_remaining: u32,
    pub status: GameStatus,
    /// Engine instance that served a freshly started game.
    pub served_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitResult {
    pub digit: i64,
    pub is_bull: bool,
    pub is_cow: bool,
    pub occurs_multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessAnalysis {
    pub digits: Vec<DigitResult>,
    pub cow_count: u32,
    pub bull_count: u32,
    /// Engine-authored text, spoken verbatim once the game is over.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub analysis: GuessAnalysis,
    pub state: GameState,
}
