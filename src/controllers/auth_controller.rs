use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::models::User;
use crate::repositories::{NewUser, Storage};
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    storage: Arc<dyn Storage>,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(storage: Arc<dyn Storage>, bcrypt_cost: u32) -> Self {
        Self { storage, bcrypt_cost }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        // Verificar que el username no exista
        if self
            .storage
            .get_user_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;

        let user = self
            .storage
            .create_user(NewUser {
                username: request.username,
                password_hash,
                name: request.name.trim().to_string(),
                phone: request.phone,
                emergency_contacts: request.emergency_contacts,
            })
            .await?;

        tracing::info!("👤 Usuario registrado: {} (id {})", user.username, user.id);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let user = self
            .storage
            .get_user_by_username(&request.username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(request.password, user.password_hash.clone()).await? {
            return Err(invalid());
        }

        Ok(user)
    }

    /// Usuario de la sesión; si ya no existe la sesión no vale
    pub async fn current_user(&self, user_id: i32) -> AppResult<User> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or(AppError::Unauthenticated)
    }
}

// bcrypt es costoso en CPU: fuera del runtime async
async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verify task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}
