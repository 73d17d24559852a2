use std::fmt;
use std::sync::Arc;

use crate::engine::GameEngine;

/// Application state shared by every request.
///
/// Holds only immutable handles. Anything decided during a turn (the selected
/// mode, the fetched mode list) lives on that turn's stack.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<dyn GameEngine>,
}

impl AppState {
    pub fn new(engine: Arc<dyn GameEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &dyn GameEngine {
        self.engine.as_ref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
