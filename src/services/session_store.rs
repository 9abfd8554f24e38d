//! Sesiones de usuario
//!
//! Las sesiones abiertas por login/registro se guardan en el mismo `Storage`
//! que el resto de datos, así sobreviven a un reinicio y se comparten entre
//! instancias cuando el backend es PostgreSQL. Una sesión vive hasta que
//! expira o hasta el logout; las expiradas se borran al abrir otra.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::Session;
use crate::repositories::Storage;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>, ttl_seconds: u64) -> Self {
        Self {
            storage,
            ttl: Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Abrir una sesión nueva para el usuario
    pub async fn open(&self, user_id: i32) -> AppResult<Session> {
        let pruned = self.storage.delete_expired_sessions().await?;
        if pruned > 0 {
            tracing::debug!("🧹 {} sesiones expiradas eliminadas", pruned);
        }

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.storage.create_session(&session).await?;

        tracing::debug!("💾 Sesión abierta para usuario {}", user_id);
        Ok(session)
    }

    /// Obtener una sesión viva; las expiradas cuentan como inexistentes
    pub async fn get(&self, id: &Uuid) -> AppResult<Option<Session>> {
        Ok(self
            .storage
            .get_session(*id)
            .await?
            .filter(|s| !s.is_expired()))
    }

    /// Cerrar una sesión. Devuelve `true` si existía.
    pub async fn revoke(&self, id: &Uuid) -> AppResult<bool> {
        self.storage.delete_session(*id).await
    }
}
