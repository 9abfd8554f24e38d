use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::CreateRouteRequest;
use crate::middleware::AuthUser;
use crate::models::Route;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn create_route_router() -> Router<AppState> {
    Router::new().route("/", get(list_routes).post(create_route))
}

async fn list_routes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Route>>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    let routes = controller.list_by_user(auth.user_id).await?;
    Ok(Json(routes))
}

async fn create_route(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRouteRequest>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let controller = RouteController::new(state.storage.clone());
    let route = controller.create(auth.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(route)))
}
