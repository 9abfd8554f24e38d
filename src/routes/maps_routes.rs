use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::dto::maps_dto::{GeocodeQuery, Place, RouteQuery, RouteSummary};
use crate::middleware::AuthUser;
use crate::services::HereMapsClient;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maps_router() -> Router<AppState> {
    Router::new()
        .route("/geocode", get(geocode))
        .route("/route", get(route))
}

fn maps_client(state: &AppState) -> Result<&HereMapsClient, AppError> {
    state
        .maps
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Maps API key not configured".to_string()))
}

async fn geocode(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<Vec<Place>>, AppError> {
    let places = maps_client(&state)?.geocode(&query.q).await?;
    Ok(Json(places))
}

async fn route(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteSummary>, AppError> {
    let mode = query.mode.as_deref().unwrap_or("metro");
    let summary = maps_client(&state)?
        .route(query.start(), query.end(), mode)
        .await?;
    Ok(Json(summary))
}
