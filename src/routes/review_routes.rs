use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::review_controller::ReviewController;
use crate::dto::review_dto::CreateReviewRequest;
use crate::middleware::AuthUser;
use crate::models::Review;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

/// Se monta bajo `/api/routes/:route_id/reviews`
pub fn create_review_router() -> Router<AppState> {
    Router::new().route("/", get(list_reviews).post(create_review))
}

async fn list_reviews(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
) -> Result<Json<Vec<Review>>, AppError> {
    let controller = ReviewController::new(state.storage.clone());
    let reviews = controller.list_by_route(route_id).await?;
    Ok(Json(reviews))
}

async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(route_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let controller = ReviewController::new(state.storage.clone());
    let review = controller.create(auth.user_id, route_id, request).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
