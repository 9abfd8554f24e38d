mod common;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use saathi_backend::{create_app, models::GeoPoint, services::HereMapsClient};

use common::{register, send, test_state};

#[derive(Clone)]
struct StubHere {
    geocode_calls: Arc<AtomicUsize>,
    rate_limited_calls: usize,
    no_routes: bool,
}

async fn stub_geocode(
    State(stub): State<StubHere>,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Response {
    let call = stub.geocode_calls.fetch_add(1, Ordering::SeqCst);
    if call < stub.rate_limited_calls {
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }
    assert_eq!(params.get("in").map(String::as_str), Some("countryCode:IND"));
    assert_eq!(params.get("apiKey").map(String::as_str), Some("test-key"));

    Json(json!({
        "items": [{
            "position": { "lat": 28.6328, "lng": 77.2197 },
            "resultType": "place",
            "address": { "label": "Rajiv Chowk, New Delhi", "city": "New Delhi", "countryCode": "IND" },
            "categories": [{ "name": "Metro Station" }]
        }]
    }))
    .into_response()
}

async fn stub_route(
    State(stub): State<StubHere>,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Response {
    if stub.no_routes {
        return Json(json!({ "routes": [] })).into_response();
    }
    assert_eq!(params.get("origin").map(String::as_str), Some("28.61,77.2"));
    Json(json!({
        "routes": [{
            "sections": [{
                "summary": { "length": 5400.0, "duration": 900.0 },
                "polyline": "BFoz5xJ67i1B1B7PzIhaxL7Y",
                "actions": [
                    { "instruction": "Head north", "length": 200.0, "duration": 40.0 },
                    { "instruction": "Arrive", "length": 0.0, "duration": 0.0 }
                ]
            }]
        }]
    }))
    .into_response()
}

async fn spawn_stub(rate_limited_calls: usize, no_routes: bool) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let stub = StubHere { geocode_calls: calls.clone(), rate_limited_calls, no_routes };
    let app = Router::new()
        .route("/v1/geocode", get(stub_geocode))
        .route("/v8/routes", get(stub_route))
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), calls)
}

fn client_for(base: &str) -> HereMapsClient {
    HereMapsClient::with_endpoints("test-key".into(), base.to_string(), base.to_string())
        .unwrap()
        .with_retry_delay(Duration::from_millis(10))
}

#[tokio::test]
async fn geocode_maps_here_items_to_places() {
    let (base, calls) = spawn_stub(0, false).await;
    let places = client_for(&base).geocode("rajiv chowk").await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Rajiv Chowk, New Delhi");
    assert_eq!(places[0].city.as_deref(), Some("New Delhi"));
    assert_eq!(places[0].category, "Metro Station");
}

#[tokio::test]
async fn geocode_retries_once_after_rate_limit() {
    let (base, calls) = spawn_stub(1, false).await;
    let places = client_for(&base).geocode("rajiv chowk").await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(places.len(), 1);
}

#[tokio::test]
async fn geocode_gives_up_after_second_rate_limit() {
    let (base, calls) = spawn_stub(5, false).await;
    let result = client_for(&base).geocode("rajiv chowk").await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn route_returns_first_section() {
    let (base, _) = spawn_stub(0, false).await;
    let summary = client_for(&base)
        .route(GeoPoint::new(28.61, 77.2), GeoPoint::new(28.70, 77.10), "metro")
        .await
        .unwrap();

    assert_eq!(summary.distance, 5400.0);
    assert_eq!(summary.duration, 900.0);
    assert_eq!(summary.instructions.len(), 2);
    assert_eq!(summary.instructions[0].instruction, "Head north");
    assert_eq!(summary.start_location, GeoPoint::new(28.61, 77.2));
}

#[tokio::test]
async fn route_without_results_is_an_error() {
    let (base, _) = spawn_stub(0, true).await;
    let result = client_for(&base)
        .route(GeoPoint::new(28.61, 77.2), GeoPoint::new(28.70, 77.10), "metro")
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn maps_endpoints_pass_through_to_here() {
    let (base, _) = spawn_stub(0, false).await;
    let app = create_app(test_state(Some(client_for(&base))));
    let cookie = register(&app, "priya").await;

    let response = send(&app, Method::GET, "/api/maps/geocode?q=rajiv%20chowk", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body[0]["countryCode"], "IND");

    let response = send(
        &app,
        Method::GET,
        "/api/maps/route?startLat=28.61&startLng=77.2&endLat=28.7&endLng=77.1",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["polyline"], "BFoz5xJ67i1B1B7PzIhaxL7Y");
}
