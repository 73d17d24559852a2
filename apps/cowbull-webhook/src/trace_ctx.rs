//! Trace id of the turn being handled.
//!
//! `RequestTrace` runs each turn inside [`in_turn`]; the error renderer reads
//! [`trace_id`] so a failure envelope's `x-trace-id` matches the request's
//! `x-request-id`. Services log inside the `TraceSpan` span instead.

use std::future::Future;

use tokio::task_local;

/// Reported when nothing opened a turn, e.g. in a bare unit test.
pub const UNTRACED: &str = "untraced";

task_local! {
    static TURN_TRACE_ID: String;
}

pub fn trace_id() -> String {
    TURN_TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNTRACED.to_string())
}

/// Run `turn` with `trace_id` visible to everything it awaits.
pub fn in_turn<F: Future>(trace_id: String, turn: F) -> impl Future<Output = F::Output> {
    TURN_TRACE_ID.scope(trace_id, turn)
}
