use axum::{
    extract::rejection::JsonRejection,
    routing::post,
    Json, Router,
};

use crate::controllers::emergency_controller::EmergencyController;
use crate::dto::emergency_dto::{EmergencyAlertRequest, EmergencyAlertResponse};
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_emergency_router() -> Router<AppState> {
    Router::new().route("/alert", post(alert))
}

async fn alert(
    auth: AuthUser,
    payload: Result<Json<EmergencyAlertRequest>, JsonRejection>,
) -> Result<Json<EmergencyAlertResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(Json(EmergencyController.alert(auth.user_id, request)?))
}
