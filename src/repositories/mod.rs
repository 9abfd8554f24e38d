//! Capa de persistencia
//!
//! `Storage` define las operaciones CRUD sobre usuarios, sesiones, rutas,
//! valoraciones y solicitudes de Saathi. Hay dos implementaciones: PostgreSQL (`PgStorage`)
//! y en memoria (`MemoryStorage`, para tests y ejecución local).

pub mod memory_repository;
pub mod postgres_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    EmergencyContact, GeoPoint, Review, Route, SaathiRequest, SaathiStatus, Session, User,
};
use crate::utils::errors::AppResult;

pub use memory_repository::MemoryStorage;
pub use postgres_repository::PgStorage;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub emergency_contacts: Vec<EmergencyContact>,
}

#[derive(Debug, Clone)]
pub struct NewRoute {
    pub user_id: i32,
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
    pub safety_score: i32,
    pub transport_mode: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: i32,
    pub route_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSaathiRequest {
    pub user_id: i32,
    pub route_id: i32,
    pub status: SaathiStatus,
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: i32) -> AppResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;
    /// Falla con `Conflict` si el username ya existe
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    async fn create_session(&self, session: &Session) -> AppResult<()>;
    /// Devuelve la sesión aunque esté expirada; filtrar es cosa del llamador
    async fn get_session(&self, id: Uuid) -> AppResult<Option<Session>>;
    /// `true` si la sesión existía
    async fn delete_session(&self, id: Uuid) -> AppResult<bool>;
    /// Borra las sesiones expiradas y devuelve cuántas había
    async fn delete_expired_sessions(&self) -> AppResult<u64>;

    async fn create_route(&self, route: NewRoute) -> AppResult<Route>;
    async fn get_routes_by_user(&self, user_id: i32) -> AppResult<Vec<Route>>;

    async fn create_review(&self, review: NewReview) -> AppResult<Review>;
    async fn get_reviews_by_route(&self, route_id: i32) -> AppResult<Vec<Review>>;

    async fn create_saathi_request(&self, request: NewSaathiRequest) -> AppResult<SaathiRequest>;
    async fn get_saathi_requests_by_user(&self, user_id: i32) -> AppResult<Vec<SaathiRequest>>;
    /// `None` si no existe la solicitud
    async fn update_saathi_request_status(
        &self,
        id: i32,
        status: SaathiStatus,
    ) -> AppResult<Option<SaathiRequest>>;
}
