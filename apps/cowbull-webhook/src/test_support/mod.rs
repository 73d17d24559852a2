//! Helpers shared by unit and integration tests.

pub mod app_builder;
pub mod stub_engine;

pub use app_builder::{create_test_app, create_test_app_builder, TestAppBuilder};
pub use stub_engine::{EngineCall, StubEngine};
