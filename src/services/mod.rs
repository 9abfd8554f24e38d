//! Servicios del sistema
//!
//! Sesiones de usuario y cliente de HERE Maps.

pub mod maps_service;
pub mod session_store;

pub use maps_service::HereMapsClient;
pub use session_store::SessionStore;
