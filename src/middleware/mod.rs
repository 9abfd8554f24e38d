//! Middleware del sistema
//!
//! Autenticación por sesión y CORS.

pub mod auth;
pub mod cors;

pub use auth::AuthUser;
pub use cors::cors_middleware;
