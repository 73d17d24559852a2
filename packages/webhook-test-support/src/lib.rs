//! Test helpers for the cowbull webhook: log setup, a scriptable fake game
//! engine, and assertions on the response envelope.

pub mod envelope;
pub mod fake_engine;
pub mod logging;

pub use fake_engine::{EngineRoute, FakeEngine, RecordedRequest};
