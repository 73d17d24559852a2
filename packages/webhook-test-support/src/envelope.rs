//! Assertions on the webhook envelope, kept free of webhook crate types so
//! they check the wire contract rather than our own serializer.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const SOURCE: &str = "cowbull-agent";

/// Envelope as the platform sees it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvelopeLike {
    pub speech: String,
    pub display_text: String,
    pub data: Map<String, Value>,
    pub source: String,
    pub followup_event: Map<String, Value>,
    pub context_out: Vec<Value>,
}

/// Parse a body and check the invariants every envelope shares.
pub fn parse_envelope(body: &[u8]) -> EnvelopeLike {
    let envelope: EnvelopeLike =
        serde_json::from_slice(body).expect("response body should be an envelope");
    assert_eq!(envelope.speech, envelope.display_text, "speech and displayText differ");
    assert_eq!(envelope.source, SOURCE);
    assert!(envelope.data.is_empty(), "data should be empty");
    assert!(envelope.followup_event.is_empty(), "followupEvent should be empty");
    envelope
}

/// Check a failure response: status, error code header, trace id parity and
/// an envelope with no contexts.
pub async fn assert_failure_envelope(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_speech_contains: Option<&str>,
) -> EnvelopeLike {
    assert_eq!(resp.status(), expected_status);

    let headers = resp.headers().clone();
    let code = headers
        .get("x-error-code")
        .expect("x-error-code header should be present")
        .to_str()
        .expect("x-error-code header should be valid UTF-8");
    assert_eq!(code, expected_code);

    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    let request_id = headers
        .get("x-request-id")
        .expect("x-request-id header should be present")
        .to_str()
        .expect("x-request-id header should be valid UTF-8");
    assert_eq!(trace_id, request_id, "x-trace-id should match x-request-id");

    let body = actix_web::test::read_body(resp).await;
    let envelope = parse_envelope(&body);
    assert!(envelope.context_out.is_empty(), "failures carry no contexts");

    if let Some(expected) = expected_speech_contains {
        assert!(
            envelope.speech.contains(expected),
            "Expected speech to contain '{}', but got '{}'",
            expected,
            envelope.speech
        );
    }
    envelope
}

/// Name of each context in `contextOut`, in order.
pub fn context_names(envelope: &EnvelopeLike) -> Vec<String> {
    envelope
        .context_out
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
