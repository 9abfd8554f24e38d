//! Middleware de autenticación por sesión
//!
//! `AuthUser` es el extractor que protege cada handler de la API: busca el
//! token en la cookie `saathi.sid` (o en `Authorization: Bearer`), verifica
//! la firma y comprueba que la sesión siga viva en el `SessionStore`.
//! Si algo falla la request termina con 401 sin cuerpo.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_bearer_token, verify_session_token},
    },
};

pub const SESSION_COOKIE: &str = "saathi.sid";

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i32,
    pub session_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AppError::Unauthenticated)?;
        let claims = verify_session_token(&token, &state.config.session_secret)?;

        let (user_id, session_id) = claims
            .user_id()
            .zip(claims.session_id())
            .ok_or(AppError::Unauthenticated)?;

        match state.sessions.get(&session_id).await? {
            Some(session) if session.user_id == user_id => Ok(AuthUser { user_id, session_id }),
            _ => Err(AppError::Unauthenticated),
        }
    }
}

/// Token de sesión: primero la cookie, luego el header Authorization
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .map(str::to_string)
    })
}

/// Header `Set-Cookie` para abrir la sesión
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(format!("Invalid cookie: {}", e)))
}

/// Header `Set-Cookie` que borra la cookie de sesión
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("saathi.sid=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}
