use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

use crate::controllers::saathi_controller::SaathiController;
use crate::dto::saathi_dto::{CreateSaathiRequestRequest, UpdateSaathiStatusRequest};
use crate::middleware::AuthUser;
use crate::models::{Saathi, SaathiRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn create_saathis_router() -> Router<AppState> {
    Router::new().route("/", get(list_saathis))
}

/// Se monta bajo `/api/saathi`
pub fn create_saathi_request_router() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests).post(create_request))
        .route("/requests/:request_id/status", patch(update_status))
}

async fn list_saathis(_auth: AuthUser, State(state): State<AppState>) -> Json<Vec<Saathi>> {
    Json(SaathiController::new(state.storage.clone()).list_saathis())
}

async fn list_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SaathiRequest>>, AppError> {
    let controller = SaathiController::new(state.storage.clone());
    Ok(Json(controller.list_requests(auth.user_id).await?))
}

async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSaathiRequestRequest>,
) -> Result<(StatusCode, Json<SaathiRequest>), AppError> {
    let controller = SaathiController::new(state.storage.clone());
    let created = controller.create_request(auth.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<i32>,
    payload: Result<Json<UpdateSaathiStatusRequest>, JsonRejection>,
) -> Result<Json<SaathiRequest>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::BadRequest("Invalid status".to_string()))?;
    let controller = SaathiController::new(state.storage.clone());
    Ok(Json(controller.update_status(request_id, request).await?))
}
