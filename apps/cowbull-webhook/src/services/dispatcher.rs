//! Entry point for a single webhook turn.

use tracing::{debug, info};

use super::{mode_validator, synthesizer, turn_state};
use crate::domain::{Action, IntentRequest};
use crate::engine::GameEngine;
use crate::error::AppError;
use crate::protocol::WebhookResponse;

/// Run one turn against `engine` and build the reply envelope.
///
/// A turn either fully succeeds or fails with the first error hit; errors
/// come back exactly as the lower layers produced them.
pub async fn dispatch(
    engine: &dyn GameEngine,
    request: &IntentRequest,
) -> Result<WebhookResponse, AppError> {
    let action = request.action()?;
    debug!(?action, contexts = request.contexts.len(), "dispatching turn");

    match action {
        Action::NewGame => new_game(engine, request).await,
        Action::MakeGuess => make_guess(engine, request).await,
        Action::GetModes => list_modes(engine, request).await,
    }
}

async fn new_game(
    engine: &dyn GameEngine,
    request: &IntentRequest,
) -> Result<WebhookResponse, AppError> {
    let mode = mode_validator::validate(engine, request.requested_mode()?).await?;
    let state = engine.start_game(mode.as_str()).await?;

    let speech = format!(
        "Okay, I've started a new game. You have {} guesses to guess {} numbers.",
        state.guesses_remaining, state.digits_required
    );
    Ok(WebhookResponse::reply(speech, turn_state::encode(&state)))
}

async fn make_guess(
    engine: &dyn GameEngine,
    request: &IntentRequest,
) -> Result<WebhookResponse, AppError> {
    let turn = turn_state::decode(&request.contexts)?;
    let digits = request.digit_list()?;

    // Rejected before any engine call, whatever the engine implementation.
    if digits.len() != turn.digits_required {
        return Err(AppError::invalid(format!(
            "There must be {0} and only {0} digits",
            turn.digits_required
        )));
    }

    let outcome = engine
        .submit_guess(turn.key.as_str(), turn.digits_required, &digits)
        .await?;
    info!(
        key = %turn.key.redacted(),
        status = ?outcome.state.status,
        guesses_remaining = outcome.state.guesses_remaining,
        "guess scored"
    );

    let text = synthesizer::synthesize(&outcome.analysis, &outcome.state);
    let contexts = turn_state::refresh(&request.contexts, outcome.state.guesses_remaining);
    Ok(WebhookResponse::reply(text, contexts))
}

async fn list_modes(
    engine: &dyn GameEngine,
    request: &IntentRequest,
) -> Result<WebhookResponse, AppError> {
    let modes = engine.fetch_modes().await?;
    let text = if modes.is_empty() {
        "The game engine isn't offering any modes right now.".to_string()
    } else {
        format!("The available game modes are: {}.", modes.join(", "))
    };
    Ok(WebhookResponse::reply(text, request.contexts.clone()))
}
