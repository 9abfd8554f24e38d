#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use saathi_backend::{
    config::EnvironmentConfig, create_app, repositories::MemoryStorage, services::HereMapsClient,
    state::AppState,
};

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
    pub raw_body: Vec<u8>,
}

pub fn test_state(maps: Option<HereMapsClient>) -> AppState {
    AppState::new(Arc::new(MemoryStorage::new()), EnvironmentConfig::for_tests(), maps)
}

pub fn test_app() -> (Router, AppState) {
    let state = test_state(None);
    (create_app(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let raw_body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    let body = serde_json::from_slice(&raw_body).unwrap_or(Value::Null);

    TestResponse { status, set_cookie, body, raw_body }
}

/// `name=value` de un header Set-Cookie, listo para mandarlo como Cookie
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

pub fn register_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "secret1",
        "confirmPassword": "secret1",
        "name": "Test User",
        "phone": "+91 98765 43210",
        "emergencyContacts": [{ "name": "Amma", "phone": "+91 99999 11111" }]
    })
}

/// Registrar un usuario y devolver su cookie de sesión
pub async fn register(app: &Router, username: &str) -> String {
    let response = send(app, Method::POST, "/api/register", Some(register_body(username)), None).await;
    assert_eq!(response.status, StatusCode::CREATED, "register failed: {}", response.body);
    cookie_pair(&response.set_cookie.expect("register sets a cookie"))
}
