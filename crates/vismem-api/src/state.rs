//! Application state.

use std::sync::Arc;

use vismem_store::{
    InMemoryStore, ScenePlanWriter, SceneStore, ShowrunnerStore, VisualMemoryStore,
};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Stores are held as trait objects so the wiring can swap the in-memory
/// default for a database-backed implementation without touching handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub scenes: Arc<dyn SceneStore>,
    pub showrunner: Arc<dyn ShowrunnerStore>,
    pub memories: Arc<dyn VisualMemoryStore>,
    pub planner: Arc<dyn ScenePlanWriter>,
}

impl AppState {
    /// Create application state backed by a single in-memory store.
    pub fn in_memory(config: ApiConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            config,
            scenes: store.clone(),
            showrunner: store.clone(),
            memories: store.clone(),
            planner: store,
        }
    }
}
