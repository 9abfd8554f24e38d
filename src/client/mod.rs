//! Cliente HTTP tipado para la API de Saathi
//!
//! La cookie de sesión vive en el cookie store de reqwest. Cada cliente
//! tiene además su `QueryCache`: las lecturas de colecciones se sirven
//! desde la caché si existe y cada escritura invalida la colección afectada.

pub mod query_cache;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use thiserror::Error;

pub use query_cache::{QueryCache, QueryKey};

use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::dto::emergency_dto::{EmergencyAlertRequest, EmergencyAlertResponse};
use crate::dto::review_dto::CreateReviewRequest;
use crate::dto::route_dto::CreateRouteRequest;
use crate::dto::saathi_dto::CreateSaathiRequestRequest;
use crate::models::{Review, Route, Saathi, SaathiRequest, SaathiStatus, User};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

pub struct SaathiClient {
    base_url: String,
    http: reqwest::Client,
    logged_in: bool,
    cache: QueryCache,
}

impl SaathiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            logged_in: false,
            cache: QueryCache::new(),
        })
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    // Auth

    pub async fn register(&mut self, request: &RegisterRequest) -> ClientResult<User> {
        self.open_session("/api/register", request).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<User> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.open_session("/api/login", &request).await
    }

    /// Cerrar sesión y vaciar la caché
    pub async fn logout(&mut self) -> ClientResult<()> {
        if self.logged_in {
            // la respuesta borra la cookie del store (Max-Age=0)
            self.send(Method::POST, "/api/logout", None::<&()>).await?;
        }
        self.logged_in = false;
        self.cache.clear();
        Ok(())
    }

    pub async fn current_user(&self) -> ClientResult<User> {
        let response = self.send(Method::GET, "/api/user", None::<&()>).await?;
        Ok(response.json().await?)
    }

    // Rutas

    pub async fn routes(&mut self) -> ClientResult<Vec<Route>> {
        self.query(QueryKey::Routes).await
    }

    pub async fn create_route(&mut self, request: &CreateRouteRequest) -> ClientResult<Route> {
        let route = self.mutate(Method::POST, "/api/routes", request).await?;
        self.cache.invalidate(&QueryKey::Routes);
        Ok(route)
    }

    // Valoraciones

    pub async fn reviews(&mut self, route_id: i32) -> ClientResult<Vec<Review>> {
        self.query(QueryKey::Reviews(route_id)).await
    }

    pub async fn create_review(
        &mut self,
        route_id: i32,
        request: &CreateReviewRequest,
    ) -> ClientResult<Review> {
        let key = QueryKey::Reviews(route_id);
        let review = self.mutate(Method::POST, &key.path(), request).await?;
        self.cache.invalidate(&key);
        Ok(review)
    }

    // Saathi

    pub async fn saathis(&mut self) -> ClientResult<Vec<Saathi>> {
        self.query(QueryKey::Saathis).await
    }

    pub async fn saathi_requests(&mut self) -> ClientResult<Vec<SaathiRequest>> {
        self.query(QueryKey::SaathiRequests).await
    }

    pub async fn create_saathi_request(
        &mut self,
        request: &CreateSaathiRequestRequest,
    ) -> ClientResult<SaathiRequest> {
        let created = self
            .mutate(Method::POST, "/api/saathi/requests", request)
            .await?;
        self.cache.invalidate(&QueryKey::SaathiRequests);
        Ok(created)
    }

    pub async fn update_saathi_request_status(
        &mut self,
        request_id: i32,
        status: SaathiStatus,
    ) -> ClientResult<SaathiRequest> {
        let path = format!("/api/saathi/requests/{}/status", request_id);
        let result = self
            .mutate(Method::PATCH, &path, &json!({ "status": status }))
            .await;
        // también ante error: el servidor pudo haber cambiado la fila
        self.cache.invalidate(&QueryKey::SaathiRequests);
        result
    }

    // Emergencia

    pub async fn emergency_alert(&self, request: &EmergencyAlertRequest) -> ClientResult<bool> {
        let response = self
            .send(Method::POST, "/api/emergency/alert", Some(request))
            .await?;
        let body: EmergencyAlertResponse = response.json().await?;
        Ok(body.success)
    }

    async fn open_session<B: Serialize>(&mut self, path: &str, body: &B) -> ClientResult<User> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        let user = response.json().await?;

        self.logged_in = true;
        self.cache.clear();
        Ok(user)
    }

    async fn query<T>(&mut self, key: QueryKey) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(cached) = self.cache.get::<T>(&key) {
            return Ok(cached);
        }

        let response = self.send(Method::GET, &key.path(), None::<&()>).await?;
        let value: T = response.json().await?;
        self.cache.put(key, &value);
        Ok(value)
    }

    async fn mutate<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<reqwest::Response> {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(response)
    }
}
