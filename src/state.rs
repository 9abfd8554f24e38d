//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Storage;
use crate::services::{HereMapsClient, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Arc<EnvironmentConfig>,
    pub sessions: SessionStore,
    pub maps: Option<HereMapsClient>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        config: EnvironmentConfig,
        maps: Option<HereMapsClient>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(storage.clone(), config.session_ttl_seconds),
            storage,
            config: Arc::new(config),
            maps,
        }
    }
}
