use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::protocol::WebhookRequest;
use crate::services::dispatcher::dispatch;
use crate::state::app_state::AppState;

/// One conversational turn. Failures are rendered by `AppError`'s
/// `ResponseError` impl as a failure envelope with an empty `contextOut`.
async fn webhook(
    body: ValidatedJson<WebhookRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let session = request.session_id.clone().unwrap_or_default();
    let intent = request.into_intent();

    let reply = dispatch(app_state.engine(), &intent).await?;
    info!(
        session = %session,
        action = intent.action.as_deref().unwrap_or(""),
        contexts_out = reply.context_out.len(),
        "turn completed"
    );

    Ok(HttpResponse::Ok().json(reply))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::post().to(webhook));
}
