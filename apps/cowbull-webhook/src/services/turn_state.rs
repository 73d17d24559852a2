//! Threads game state through the platform's context tokens.
//!
//! A new game is written out as four contexts, each living for
//! [`LIFESPAN`] turns:
//!
//! | context     | parameter           |
//! |-------------|---------------------|
//! | `digits`    | `digits`            |
//! | `guesses`   | `guesses_remaining` |
//! | `key`       | `key`               |
//! | `served-by` | `served-by`         |
//!
//! The platform hands them back on every later turn. Lookups always take the
//! first context with a given name.

use serde_json::Value;

use crate::domain::{GameKey, GameState};
use crate::error::AppError;
use crate::protocol::context::{find_first, Context};

pub const LIFESPAN: u32 = 15;

pub const DIGITS: &str = "digits";
pub const GUESSES: &str = "guesses";
pub const KEY: &str = "key";
pub const SERVED_BY: &str = "served-by";

const GUESSES_PARAM: &str = "guesses_remaining";

/// Game state recovered from the contexts of an inbound turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub key: GameKey,
    pub digits_required: usize,
    pub guesses_remaining: u32,
}

pub fn encode(state: &GameState) -> Vec<Context> {
    let served_by = state
        .served_by
        .clone()
        .map(Value::String)
        .unwrap_or(Value::Null);

    vec![
        Context::new(DIGITS, LIFESPAN).with_param(DIGITS, state.digits_required),
        Context::new(GUESSES, LIFESPAN).with_param(GUESSES_PARAM, state.guesses_remaining),
        Context::new(KEY, LIFESPAN).with_param(KEY, state.key.as_str()),
        Context::new(SERVED_BY, LIFESPAN).with_param(SERVED_BY, served_by),
    ]
}

pub fn decode(contexts: &[Context]) -> Result<TurnState, AppError> {
    if contexts.is_empty() {
        return Err(AppError::missing_context(
            "No contexts were supplied, so there is no game to guess in. Start a new game first.",
        ));
    }

    let key = match required_param(contexts, KEY, KEY)? {
        Value::String(k) if !k.is_empty() => GameKey::new(k.clone()),
        other => {
            return Err(AppError::invalid(format!(
                "The game key must be non-empty text, not {other}"
            )))
        }
    };

    let digits_required = whole_number(required_param(contexts, DIGITS, DIGITS)?, DIGITS)?;
    if digits_required == 0 {
        return Err(AppError::invalid(
            "The digits required are zero, so a guess cannot be made.",
        ));
    }
    let digits_required = usize::try_from(digits_required)
        .map_err(|_| AppError::invalid(format!("{digits_required} digits is too many")))?;

    let guesses_remaining =
        whole_number(required_param(contexts, GUESSES, GUESSES_PARAM)?, GUESSES)?;
    let guesses_remaining = u32::try_from(guesses_remaining)
        .map_err(|_| AppError::invalid(format!("{guesses_remaining} guesses is too many")))?;

    Ok(TurnState {
        key,
        digits_required,
        guesses_remaining,
    })
}

/// Copy of `contexts` with the first `guesses` entry carrying the new count.
/// Everything else is passed back untouched.
pub fn refresh(contexts: &[Context], guesses_remaining: u32) -> Vec<Context> {
    let mut out = contexts.to_vec();
    if let Some(ctx) = out.iter_mut().find(|c| c.name == GUESSES) {
        ctx.parameters
            .insert(GUESSES_PARAM.to_string(), Value::from(guesses_remaining));
    }
    out
}

fn required_param<'a>(
    contexts: &'a [Context],
    name: &str,
    param: &str,
) -> Result<&'a Value, AppError> {
    let ctx = find_first(contexts, name).ok_or_else(|| {
        AppError::missing_context(format!(
            "The {name} context is missing. Start a new game to keep playing."
        ))
    })?;
    ctx.param(param).ok_or_else(|| {
        AppError::missing_context(format!("The {name} context has no {param} value"))
    })
}

/// The platform may hand numbers back as JSON numbers or as strings.
fn whole_number(value: &Value, what: &str) -> Result<u64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        AppError::invalid(format!("The {what} value {value} is not a whole number"))
    })
}
