use std::sync::Arc;

use crate::dto::route_dto::CreateRouteRequest;
use crate::models::route::{effective_safety_score, Route};
use crate::repositories::{NewRoute, Storage};
use crate::utils::errors::AppResult;

pub struct RouteController {
    storage: Arc<dyn Storage>,
}

impl RouteController {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, user_id: i32, request: CreateRouteRequest) -> AppResult<Route> {
        let route = self
            .storage
            .create_route(NewRoute {
                user_id,
                start_location: request.start_location,
                end_location: request.end_location,
                safety_score: effective_safety_score(request.safety_score),
                transport_mode: request.transport_mode,
            })
            .await?;

        tracing::debug!("🛣️ Ruta {} guardada para usuario {}", route.id, user_id);
        Ok(route)
    }

    pub async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Route>> {
        self.storage.get_routes_by_user(user_id).await
    }
}
