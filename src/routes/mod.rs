//! Routers HTTP por área funcional

pub mod auth_routes;
pub mod emergency_routes;
pub mod maps_routes;
pub mod review_routes;
pub mod route_routes;
pub mod saathi_routes;

use axum::Router;

use crate::state::AppState;

/// Crear el router de la API (todo bajo `/api`)
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes::create_auth_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/routes/:route_id/reviews", review_routes::create_review_router())
        .nest("/saathis", saathi_routes::create_saathis_router())
        .nest("/saathi", saathi_routes::create_saathi_request_router())
        .nest("/emergency", emergency_routes::create_emergency_router())
        .nest("/maps", maps_routes::create_maps_router())
}
