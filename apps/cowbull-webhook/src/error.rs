use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::protocol::webhook::WebhookResponse;
use crate::trace_ctx;

/// Every failure a turn can end with.
///
/// Components return `Result<T, AppError>` and never recategorize an error on
/// the way up; the HTTP boundary renders it as a failure envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Malformed request: {detail}")]
    MalformedRequest { detail: String },
    #[error("Unknown action: {action}")]
    UnknownAction { action: String },
    #[error("Validation error: {detail}")]
    Validation { detail: String },
    #[error("Missing context: {detail}")]
    MissingContext { detail: String },
    #[error("Invalid mode: {mode}")]
    InvalidMode { mode: String },
    #[error("Service unavailable: {detail}")]
    ServiceUnavailable { detail: String },
    #[error("Engine rejected request: {detail}")]
    EngineRejected { detail: String },
    #[error("Engine error: status {status}")]
    GenericEngine { status: u16 },
    #[error("Malformed engine response: {detail}")]
    MalformedEngineResponse { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable SCREAMING_SNAKE_CASE code for logs and the `x-error-code` header.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MalformedRequest { .. } => "MALFORMED_REQUEST",
            AppError::UnknownAction { .. } => "UNKNOWN_ACTION",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::MissingContext { .. } => "MISSING_CONTEXT",
            AppError::InvalidMode { .. } => "INVALID_MODE",
            AppError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            AppError::EngineRejected { .. } => "ENGINE_REJECTED",
            AppError::GenericEngine { .. } => "ENGINE_ERROR",
            AppError::MalformedEngineResponse { .. } => "MALFORMED_ENGINE_RESPONSE",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    /// Human-readable text spoken back to the user.
    pub fn detail(&self) -> String {
        match self {
            AppError::MalformedRequest { detail } => detail.clone(),
            AppError::UnknownAction { action } => format!("Unknown action: {action}"),
            AppError::Validation { detail } => detail.clone(),
            AppError::MissingContext { detail } => detail.clone(),
            AppError::InvalidMode { mode } => {
                format!("The mode you entered ({mode}) isn't supported")
            }
            AppError::ServiceUnavailable { detail } => {
                format!("Unfortunately, the game service is unavailable: {detail}")
            }
            AppError::EngineRejected { detail } => detail.clone(),
            AppError::GenericEngine { status } => {
                format!("Game reported an error: HTML Status Code = {status}")
            }
            AppError::MalformedEngineResponse { detail } => {
                format!("The game engine sent a response that could not be read: {detail}")
            }
            AppError::Config { detail } => detail.clone(),
            AppError::Internal { detail } => {
                format!("An exception occurred in the API webhook: {detail}")
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest { .. }
            | AppError::UnknownAction { .. }
            | AppError::Validation { .. }
            | AppError::MissingContext { .. }
            | AppError::InvalidMode { .. } => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::EngineRejected { .. }
            | AppError::GenericEngine { .. }
            | AppError::MalformedEngineResponse { .. }
            | AppError::Config { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedRequest {
            detail: detail.into(),
        }
    }

    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub fn missing_context(detail: impl Into<String>) -> Self {
        Self::MissingContext {
            detail: detail.into(),
        }
    }

    pub fn invalid_mode(mode: impl Into<String>) -> Self {
        Self::InvalidMode { mode: mode.into() }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            detail: detail.into(),
        }
    }

    pub fn engine_rejected(detail: impl Into<String>) -> Self {
        Self::EngineRejected {
            detail: detail.into(),
        }
    }

    pub fn engine_status(status: u16) -> Self {
        Self::GenericEngine { status }
    }

    pub fn malformed_engine_response(detail: impl Into<String>) -> Self {
        Self::MalformedEngineResponse {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            tracing::error!(
                trace_id = %trace_id,
                code = self.code(),
                status = status.as_u16(),
                error = %self,
                "turn failed"
            );
        } else {
            tracing::warn!(
                trace_id = %trace_id,
                code = self.code(),
                status = status.as_u16(),
                error = %self,
                "turn rejected"
            );
        }

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .insert_header(("x-error-code", self.code()))
            .json(WebhookResponse::failure(self.detail()))
    }
}
