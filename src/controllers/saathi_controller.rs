use std::sync::Arc;

use crate::dto::saathi_dto::{CreateSaathiRequestRequest, UpdateSaathiStatusRequest};
use crate::models::saathi::sample_saathis;
use crate::models::{Saathi, SaathiRequest};
use crate::repositories::{NewSaathiRequest, Storage};
use crate::utils::errors::{AppError, AppResult};

pub struct SaathiController {
    storage: Arc<dyn Storage>,
}

impl SaathiController {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Acompañantes disponibles. Por ahora lista fija, sin disponibilidad real.
    pub fn list_saathis(&self) -> Vec<Saathi> {
        sample_saathis()
    }

    pub async fn create_request(
        &self,
        user_id: i32,
        request: CreateSaathiRequestRequest,
    ) -> AppResult<SaathiRequest> {
        let status = request.initial_status();
        self.storage
            .create_saathi_request(NewSaathiRequest {
                user_id,
                route_id: request.route_id,
                status,
            })
            .await
    }

    pub async fn list_requests(&self, user_id: i32) -> AppResult<Vec<SaathiRequest>> {
        self.storage.get_saathi_requests_by_user(user_id).await
    }

    /// Cambiar a `accepted`/`rejected`. No se mira el estado actual.
    pub async fn update_status(
        &self,
        request_id: i32,
        request: UpdateSaathiStatusRequest,
    ) -> AppResult<SaathiRequest> {
        let status = request
            .decision()
            .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;

        let updated = self
            .storage
            .update_saathi_request_status(request_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Saathi request {} not found", request_id)))?;

        tracing::info!("🤝 Solicitud {} → {}", request_id, status);
        Ok(updated)
    }
}
