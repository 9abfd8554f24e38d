//! Backend de Saathi: rutas seguras, acompañantes y alertas de emergencia.

pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use config::{EnvironmentConfig, StorageBackend};
use repositories::{MemoryStorage, PgStorage, Storage};
use services::HereMapsClient;
use state::AppState;

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::create_api_router())
        .layer(middleware::cors_middleware(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Inicializar store, sesiones y cliente de mapas según la configuración
pub async fn build_state(config: EnvironmentConfig) -> anyhow::Result<AppState> {
    let storage: Arc<dyn Storage> = match config.storage {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
            let pool = database::connect(url, config.database_max_connections, config.run_migrations).await?;
            Arc::new(PgStorage::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("⚠️ Usando store en memoria: los datos se pierden al reiniciar");
            Arc::new(MemoryStorage::new())
        }
    };

    let maps = match config.here_api_key.clone() {
        Some(key) => Some(HereMapsClient::new(key)?),
        None => {
            tracing::warn!("⚠️ HERE_API_KEY no configurada: /api/maps responderá 503");
            None
        }
    };

    Ok(AppState::new(storage, config, maps))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
