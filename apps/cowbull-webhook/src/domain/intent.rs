use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::protocol::Context;

/// Actions the webhook understands. Names are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NewGame,
    MakeGuess,
    GetModes,
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newgame" => Ok(Action::NewGame),
            "makeguess" => Ok(Action::MakeGuess),
            "getmodes" => Ok(Action::GetModes),
            _ => Err(AppError::unknown_action(s)),
        }
    }
}

/// One inbound turn, as handed to the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct IntentRequest {
    pub action: Option<String>,
    pub parameters: Map<String, Value>,
    pub contexts: Vec<Context>,
}

impl IntentRequest {
    pub fn action(&self) -> Result<Action, AppError> {
        match self.action.as_deref() {
            None => Err(AppError::malformed(
                "No action was provided. The request was badly formed!",
            )),
            Some(raw) => raw.parse(),
        }
    }

    /// The `mode` parameter, if one was sent. Non-string values are rejected.
    pub fn requested_mode(&self) -> Result<Option<&str>, AppError> {
        match self.parameters.get("mode") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(mode)) => Ok(Some(mode.as_str())),
            Some(other) => Err(AppError::invalid(format!(
                "The mode must be given as text, not {other}"
            ))),
        }
    }

    /// The `digitlist` parameter converted to integers.
    ///
    /// Entries may arrive as JSON numbers or as numeric strings.
    pub fn digit_list(&self) -> Result<Vec<i64>, AppError> {
        let raw = match self.parameters.get("digitlist") {
            None | Some(Value::Null) => {
                return Err(AppError::malformed(
                    "The key digitlist is missing from the JSON",
                ))
            }
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(AppError::invalid(format!(
                    "The digit list must be a list of numbers, not {other}"
                )))
            }
        };

        raw.iter().map(parse_digit).collect()
    }
}

fn parse_digit(value: &Value) -> Result<i64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // Platforms often send `4` as `4.0`.
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::invalid(format!("{value} is not a whole number")))
}
