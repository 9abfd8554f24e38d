use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NewReview, NewRoute, NewSaathiRequest, NewUser, Storage};
use crate::models::{Review, Route, SaathiRequest, SaathiStatus, Session, User};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<Session>,
    routes: Vec<Route>,
    reviews: Vec<Review>,
    saathi_requests: Vec<SaathiRequest>,
}

/// Store en memoria con ids secuenciales por tabla (como `serial`)
#[derive(Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_user(&self, id: i32) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let user = User {
            id: next_id(tables.users.len()),
            username: user.username,
            password_hash: user.password_hash,
            name: user.name,
            phone: user.phone,
            emergency_contacts: user.emergency_contacts,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn create_session(&self, session: &Session) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.sessions.push(session.clone());
        Ok(())
    }

    async fn get_session(&self, id: Uuid) -> AppResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn delete_session(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.id != id);
        Ok(tables.sessions.len() < before)
    }

    async fn delete_expired_sessions(&self) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| !s.is_expired());
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn create_route(&self, route: NewRoute) -> AppResult<Route> {
        let mut tables = self.tables.write().await;
        let route = Route {
            id: next_id(tables.routes.len()),
            user_id: route.user_id,
            start_location: route.start_location,
            end_location: route.end_location,
            safety_score: route.safety_score,
            transport_mode: route.transport_mode,
            created_at: Utc::now(),
        };
        tables.routes.push(route.clone());
        Ok(route)
    }

    async fn get_routes_by_user(&self, user_id: i32) -> AppResult<Vec<Route>> {
        let tables = self.tables.read().await;
        Ok(tables.routes.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn create_review(&self, review: NewReview) -> AppResult<Review> {
        let mut tables = self.tables.write().await;
        let review = Review {
            id: next_id(tables.reviews.len()),
            user_id: review.user_id,
            route_id: review.route_id,
            rating: review.rating,
            comment: review.comment,
            created_at: Utc::now(),
        };
        tables.reviews.push(review.clone());
        Ok(review)
    }

    async fn get_reviews_by_route(&self, route_id: i32) -> AppResult<Vec<Review>> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().filter(|r| r.route_id == route_id).cloned().collect())
    }

    async fn create_saathi_request(&self, request: NewSaathiRequest) -> AppResult<SaathiRequest> {
        let mut tables = self.tables.write().await;
        let request = SaathiRequest {
            id: next_id(tables.saathi_requests.len()),
            user_id: request.user_id,
            route_id: request.route_id,
            status: request.status,
            created_at: Utc::now(),
        };
        tables.saathi_requests.push(request.clone());
        Ok(request)
    }

    async fn get_saathi_requests_by_user(&self, user_id: i32) -> AppResult<Vec<SaathiRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .saathi_requests
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_saathi_request_status(
        &self,
        id: i32,
        status: SaathiStatus,
    ) -> AppResult<Option<SaathiRequest>> {
        let mut tables = self.tables.write().await;
        Ok(tables.saathi_requests.iter_mut().find(|r| r.id == id).map(|r| {
            r.status = status;
            r.clone()
        }))
    }
}
