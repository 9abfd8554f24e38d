use std::sync::Arc;

use crate::dto::review_dto::CreateReviewRequest;
use crate::models::Review;
use crate::repositories::{NewReview, Storage};
use crate::utils::errors::AppResult;

pub struct ReviewController {
    storage: Arc<dyn Storage>,
}

impl ReviewController {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // El route_id no se contrasta con la tabla de rutas
    pub async fn create(
        &self,
        user_id: i32,
        route_id: i32,
        request: CreateReviewRequest,
    ) -> AppResult<Review> {
        let comment = request.normalized_comment();
        self.storage
            .create_review(NewReview {
                user_id,
                route_id,
                rating: request.rating,
                comment,
            })
            .await
    }

    pub async fn list_by_route(&self, route_id: i32) -> AppResult<Vec<Review>> {
        self.storage.get_reviews_by_route(route_id).await
    }
}
