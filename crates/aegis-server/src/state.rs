//! Shared application state.
//!
//! Everything here is read-only after startup: the engine's specification
//! table and catalog are process-wide constants, and each request's
//! computation is owned by its own call stack.

use crate::config::Config;
use aegis_core::DecisionEngine;
use aegis_ranker::RankerClient;
use std::time::Duration;

pub struct AppState {
    pub engine: DecisionEngine,
    pub ranker: RankerClient,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let ranker = RankerClient::with_timeout(
            config.ranker_url.clone(),
            Duration::from_secs(config.ranker_timeout_secs),
        );
        Self {
            engine: DecisionEngine::default(),
            ranker,
            config,
        }
    }
}
