//! Utilidades JWT para la cookie de sesión
//!
//! La cookie de sesión lleva un JWT firmado con el secreto del servidor.
//! Los claims identifican al usuario y a la sesión guardada en el store,
//! así un id de sesión no se puede falsificar ni reutilizar para otro usuario.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{models::Session, utils::errors::AppError};

/// Claims del token de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // user_id
    pub sid: String, // session_id
    pub exp: usize,
    pub iat: usize,
}

impl SessionClaims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    pub fn session_id(&self) -> Option<uuid::Uuid> {
        uuid::Uuid::parse_str(&self.sid).ok()
    }
}

/// Generar el token firmado para una sesión recién abierta
pub fn issue_session_token(session: &Session, secret: &str) -> Result<String, AppError> {
    let claims = SessionClaims {
        sub: session.user_id.to_string(),
        sid: session.id.to_string(),
        exp: session.expires_at.timestamp() as usize,
        iat: session.created_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar firma y expiración del token de sesión
pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Token de sesión inválido: {}", e);
        AppError::Unauthenticated
    })
}

/// Extraer token del header Authorization
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
