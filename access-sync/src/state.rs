//! Shared application state.

use crate::config::Config;
use crate::reconcile::SyncEngine;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub engine: SyncEngine,
}

impl AppState {
    pub fn new(config: Config, engine: SyncEngine) -> Self {
        Self { config, engine }
    }

    pub fn debug(&self) -> bool {
        self.config.sync.debug
    }
}
