use axum::extract::FromRef;

use crate::recommend::RecommendationEngine;
use crate::search::CatalogSearch;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

// Read-only after startup, no locking needed.
pub type SharedEngine = Arc<RecommendationEngine>;
pub type SharedSearch = Arc<CatalogSearch>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub engine: SharedEngine,
    pub search: SharedSearch,
}

impl FromRef<ServerState> for SharedEngine {
    fn from_ref(input: &ServerState) -> Self {
        input.engine.clone()
    }
}

impl FromRef<ServerState> for SharedSearch {
    fn from_ref(input: &ServerState) -> Self {
        input.search.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
