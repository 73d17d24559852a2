use std::sync::Arc;

use crate::config::EngineConfig;
use crate::engine::{CowbullClient, GameEngine};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    engine_config: Option<EngineConfig>,
    engine: Option<Arc<dyn GameEngine>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Talk to a real engine over HTTP.
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = Some(config);
        self
    }

    /// Use a ready-made engine. Takes precedence over `with_engine_config`.
    pub fn with_engine(mut self, engine: Arc<dyn GameEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        if let Some(engine) = self.engine {
            return Ok(AppState::new(engine));
        }
        let config = self.engine_config.ok_or_else(|| {
            AppError::config("No game engine configured; set COWBULL_URL".to_string())
        })?;
        let client = CowbullClient::new(&config)?;
        Ok(AppState::new(Arc::new(client)))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
