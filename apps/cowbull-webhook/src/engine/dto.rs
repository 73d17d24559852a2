//! Engine wire formats.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DigitResult, GameKey, GameState, GameStatus, GuessAnalysis, GuessOutcome};
use crate::protocol::null_as_default;

#[derive(Debug, Deserialize)]
pub struct ModeEntry {
    pub mode: String,
}

/// Body of `GET {game}?mode={mode}`.
#[derive(Debug, Deserialize)]
pub struct NewGameBody {
    pub digits: usize,
    pub guesses: u32,
    pub key: String,
    #[serde(rename = "served-by", default)]
    pub served_by: Option<String>,
}

impl From<NewGameBody> for GameState {
    fn from(body: NewGameBody) -> Self {
        GameState {
            key: GameKey::new(body.key),
            digits_required: body.digits,
            guesses_remaining: body.guesses,
            status: GameStatus::InProgress,
            served_by: body.served_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GuessRequest<'a> {
    pub key: &'a str,
    pub digits: &'a [i64],
}

#[derive(Debug, Deserialize)]
pub struct GuessResponseBody {
    pub game: GameBody,
    pub outcome: OutcomeBody,
}

#[derive(Debug, Deserialize)]
pub struct GameBody {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub guesses_remaining: u32,
}

#[derive(Debug, Deserialize)]
pub struct OutcomeBody {
    #[serde(default)]
    pub message: Option<String>,
    // Won/Lost answers may null these out; only `message` is read then.
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: Vec<DigitBody>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cows: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bulls: u32,
}

#[derive(Debug, Deserialize)]
pub struct DigitBody {
    pub digit: i64,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub in_word: bool,
    pub multiple: bool,
}

impl From<DigitBody> for DigitResult {
    fn from(d: DigitBody) -> Self {
        DigitResult {
            digit: d.digit,
            is_bull: d.is_match,
            is_cow: d.in_word,
            occurs_multiple: d.multiple,
        }
    }
}

impl GuessResponseBody {
    /// The engine does not echo the key or digit count, so the caller's
    /// values are carried into the returned state.
    pub fn into_outcome(self, key: &str, digits_required: usize) -> GuessOutcome {
        let analysis = GuessAnalysis {
            digits: self.outcome.analysis.into_iter().map(Into::into).collect(),
            cow_count: self.outcome.cows,
            bull_count: self.outcome.bulls,
            message: self.outcome.message.unwrap_or_default(),
        };
        let state = GameState {
            key: GameKey::new(key),
            digits_required,
            guesses_remaining: self.game.guesses_remaining,
            status: GameStatus::from_engine(&self.game.status),
            served_by: None,
        };
        GuessOutcome { analysis, state }
    }
}

/// Text for an engine 400: the body's `message` followed directly by its
/// `exception`. Falls back to the raw body when it is not that shape.
pub fn rejection_text(body: &str) -> String {
    let fields = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        let obj = v.as_object()?;
        let message = obj.get("message").map(text_of);
        let exception = obj.get("exception").map(text_of);
        if message.is_none() && exception.is_none() {
            None
        } else {
            Some(format!(
                "{}{}",
                message.unwrap_or_default(),
                exception.unwrap_or_default()
            ))
        }
    });

    match fields {
        Some(text) => text,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => "Game reported an error: HTML Status Code = 400".to_string(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_game_body_maps_to_fresh_state() {
        let body: NewGameBody = serde_json::from_value(json!({
            "digits": 4, "guesses": 10, "key": "abc-123", "served-by": "engine-7"
        }))
        .unwrap();
        let state = GameState::from(body);
        assert_eq!(state.digits_required, 4);
        assert_eq!(state.guesses_remaining, 10);
        assert_eq!(state.key.as_str(), "abc-123");
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.served_by.as_deref(), Some("engine-7"));
    }

    #[test]
    fn guess_body_maps_engine_field_names() {
        let body: GuessResponseBody = serde_json::from_value(json!({
            "game": {"status": "playing", "guesses_remaining": 6},
            "outcome": {
                "message": "",
                "analysis": [
                    {"digit": 1, "match": true, "in_word": true, "multiple": false},
                    {"digit": 2, "match": false, "in_word": false, "multiple": true}
                ],
                "cows": 0,
                "bulls": 1
            }
        }))
        .unwrap();
        let outcome = body.into_outcome("k", 2);
        assert_eq!(outcome.state.guesses_remaining, 6);
        assert_eq!(outcome.state.digits_required, 2);
        assert_eq!(outcome.analysis.bull_count, 1);
        assert!(outcome.analysis.digits[0].is_bull);
        assert!(outcome.analysis.digits[1].occurs_multiple);
        assert!(!outcome.analysis.digits[1].is_cow);
    }

    #[test]
    fn finished_game_may_null_out_the_analysis() {
        let body: GuessResponseBody = serde_json::from_value(json!({
            "game": {"status": "won", "guesses_remaining": null},
            "outcome": {"message": "You won!", "analysis": null, "cows": null, "bulls": null}
        }))
        .unwrap();
        let outcome = body.into_outcome("k", 4);
        assert_eq!(outcome.state.status, GameStatus::Won);
        assert_eq!(outcome.analysis.message, "You won!");
        assert!(outcome.analysis.digits.is_empty());
        assert_eq!(outcome.analysis.cow_count, 0);
    }

    #[test]
    fn rejection_text_concatenates_message_and_exception() {
        let body = r#"{"message": "Key not found. ", "exception": "KeyError"}"#;
        assert_eq!(rejection_text(body), "Key not found. KeyError");
    }

    #[test]
    fn rejection_text_tolerates_missing_fields() {
        assert_eq!(rejection_text(r#"{"message": "bad"}"#), "bad");
        assert_eq!(rejection_text("plain text"), "plain text");
        assert!(rejection_text("").contains("400"));
    }
}
