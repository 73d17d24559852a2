use actix_web::web;

pub mod health;
pub mod webhook;

/// Register every route. `main.rs` and the test app builder both use this,
/// so tests see exactly the production paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.configure(webhook::configure_routes);
}
