use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{NewReview, NewRoute, NewSaathiRequest, NewUser, Storage};
use crate::models::{
    EmergencyContact, GeoPoint, Review, Route, SaathiRequest, SaathiStatus, Session, User,
};
use crate::utils::errors::{AppError, AppResult};

// Filas tal como salen de PostgreSQL; las columnas JSON llegan envueltas en `Json`

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password: String,
    name: String,
    phone: String,
    emergency_contacts: Json<Vec<EmergencyContact>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password,
            name: row.name,
            phone: row.phone,
            emergency_contacts: row.emergency_contacts.0,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: i32,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RouteRow {
    id: i32,
    user_id: i32,
    start_location: Json<GeoPoint>,
    end_location: Json<GeoPoint>,
    safety_score: i32,
    transport_mode: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            start_location: row.start_location.0,
            end_location: row.end_location.0,
            safety_score: row.safety_score,
            transport_mode: row.transport_mode,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    user_id: i32,
    route_id: i32,
    rating: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            route_id: row.route_id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SaathiRequestRow {
    id: i32,
    user_id: i32,
    route_id: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SaathiRequestRow> for SaathiRequest {
    type Error = AppError;

    fn try_from(row: SaathiRequestRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<SaathiStatus>()
            .map_err(AppError::Internal)?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            route_id: row.route_id,
            status,
            created_at: row.created_at,
        })
    }
}

pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: i32) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, name, phone, emergency_contacts)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.name)
        .bind(user.phone)
        .bind(Json(user.emergency_contacts))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Username already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

        Ok(row.into())
    }

    async fn create_session(&self, session: &Session) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_session(&self, id: Uuid) -> AppResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Session::from))
    }

    async fn delete_session(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired_sessions(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < now()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_route(&self, route: NewRoute) -> AppResult<Route> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            INSERT INTO routes (user_id, start_location, end_location, safety_score, transport_mode)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(route.user_id)
        .bind(Json(route.start_location))
        .bind(Json(route.end_location))
        .bind(route.safety_score)
        .bind(route.transport_mode)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_routes_by_user(&self, user_id: i32) -> AppResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn create_review(&self, review: NewReview) -> AppResult<Review> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (user_id, route_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(review.user_id)
        .bind(review.route_id)
        .bind(review.rating)
        .bind(review.comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_reviews_by_route(&self, route_id: i32) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>("SELECT * FROM reviews WHERE route_id = $1")
            .bind(route_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn create_saathi_request(&self, request: NewSaathiRequest) -> AppResult<SaathiRequest> {
        let row = sqlx::query_as::<_, SaathiRequestRow>(
            r#"
            INSERT INTO saathi_requests (user_id, route_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(request.route_id)
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_saathi_requests_by_user(&self, user_id: i32) -> AppResult<Vec<SaathiRequest>> {
        let rows = sqlx::query_as::<_, SaathiRequestRow>(
            "SELECT * FROM saathi_requests WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SaathiRequest::try_from).collect()
    }

    async fn update_saathi_request_status(
        &self,
        id: i32,
        status: SaathiStatus,
    ) -> AppResult<Option<SaathiRequest>> {
        let row = sqlx::query_as::<_, SaathiRequestRow>(
            "UPDATE saathi_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SaathiRequest::try_from).transpose()
    }
}
