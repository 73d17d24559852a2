#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::Error as ActixError;
use cowbull_webhook::config::EngineConfig;
use cowbull_webhook::engine::CowbullClient;
use cowbull_webhook::infra::state::build_state;
use cowbull_webhook::test_support::create_test_app_builder;
use serde_json::{json, Value};
use webhook_test_support::fake_engine::FAKE_KEY;
use webhook_test_support::FakeEngine;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    webhook_test_support::logging::init();
}

/// Client pointed at `fake` through the templated URL form.
pub fn client_for(fake: &FakeEngine) -> CowbullClient {
    CowbullClient::new(&EngineConfig::new(fake.template_url())).expect("valid engine config")
}

/// The production app, talking HTTP to `fake`.
pub async fn app_for(
    fake: &FakeEngine,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    let state = build_state()
        .with_engine_config(EngineConfig::new(fake.template_url()))
        .build()
        .expect("state should build");
    create_test_app_builder(state).build().await
}

/// Contexts exactly as `newgame` hands them out for the fake engine's
/// default game.
pub fn game_contexts() -> Value {
    json!([
        {"name": "digits", "lifespan": 15, "parameters": {"digits": 4}},
        {"name": "guesses", "lifespan": 15, "parameters": {"guesses_remaining": 10}},
        {"name": "key", "lifespan": 15, "parameters": {"key": FAKE_KEY}},
        {"name": "served-by", "lifespan": 15, "parameters": {"served-by": "fake-engine"}}
    ])
}
