use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::middleware::auth::{clear_session_cookie, session_cookie, AuthUser};
use crate::models::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::issue_session_token;
use crate::utils::validation::ValidatedJson;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(current_user))
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.storage.clone(), state.config.bcrypt_cost)
}

/// Abrir sesión y construir el `Set-Cookie` correspondiente
async fn start_session(state: &AppState, user: &User) -> Result<header::HeaderValue, AppError> {
    let session = state.sessions.open(user.id).await?;
    let token = issue_session_token(&session, &state.config.session_secret)?;
    session_cookie(&token, state.sessions.ttl_seconds(), state.config.is_production())
}

async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = controller(&state).register(request).await?;
    let cookie = start_session(&state, &user).await?;
    Ok((StatusCode::CREATED, [(header::SET_COOKIE, cookie)], Json(user)))
}

async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = controller(&state).login(request).await?;
    let cookie = start_session(&state, &user).await?;
    tracing::info!("🔑 Login de {}", user.username);
    Ok(([(header::SET_COOKIE, cookie)], Json(user)))
}

async fn logout(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(auth) = auth {
        state.sessions.revoke(&auth.session_id).await?;
    }
    Ok((StatusCode::OK, [(header::SET_COOKIE, clear_session_cookie())]))
}

async fn current_user(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, AppError> {
    let user = controller(&state).current_user(auth.user_id).await?;
    Ok(Json(user))
}
