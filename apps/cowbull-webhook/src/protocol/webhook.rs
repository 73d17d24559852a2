//! Inbound webhook body and the outgoing envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::context::Context;
use super::null_as_default;
use crate::domain::intent::IntentRequest;

/// Constant identifier placed in every envelope's `source` field.
pub const SOURCE: &str = "cowbull-agent";

/// The three fields the dispatcher cares about.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<Context>,
}

/// Inbound webhook body.
///
/// Accepts both the flat shape (`action`, `parameters`, `contexts` at the top
/// level) and the API.AI v1 shape where they sit under `result`. When both are
/// present, `result` wins.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub original_request: Option<Value>,
    #[serde(default)]
    pub result: Option<QueryResult>,
    #[serde(flatten)]
    pub inline: QueryResult,
}

impl WebhookRequest {
    pub fn into_intent(self) -> IntentRequest {
        let query = self.result.unwrap_or(self.inline);
        IntentRequest {
            action: query.action,
            parameters: query.parameters,
            contexts: query.contexts,
        }
    }
}

/// Outgoing envelope, identical in shape for success and failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub speech: String,
    pub display_text: String,
    pub data: Map<String, Value>,
    pub source: String,
    pub followup_event: Map<String, Value>,
    pub context_out: Vec<Context>,
}

impl WebhookResponse {
    /// Spoken and displayed text are always the same string.
    pub fn reply(text: impl Into<String>, context_out: Vec<Context>) -> Self {
        let text = text.into();
        Self {
            speech: text.clone(),
            display_text: text,
            data: Map::new(),
            source: SOURCE.to_string(),
            followup_event: Map::new(),
            context_out,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::reply(message, Vec::new())
    }
}
