use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::Request,
    routing::get,
};
use camino::{
    AppState,
    config::AppConfig,
    create_router,
    directions::StraightLineDirections,
    models::{ApiError, DayResponse, Destination, FocusResponse, RouteResponse, TranslateResponse},
};
use hyper::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _cache: TempDir,
}

async fn weather_stub() -> String {
    let stub = Router::new().route(
        "/v1/forecast",
        get(|| async { Json(json!({"current": {"temperature_2m": 14.0, "precipitation": 0.2}})) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });
    format!("http://{addr}")
}

async fn test_app() -> TestApp {
    let cache = tempfile::tempdir().unwrap();
    let mut config = AppConfig::from_lookup(|_| None).unwrap();
    config.overview_throttle = Duration::ZERO;
    config.cache_dir = cache.path().to_path_buf();
    config.weather_url = weather_stub().await;

    let state =
        AppState::with_directions(Arc::new(StraightLineDirections::new(4)), &config).unwrap();
    state.spawn_location_tracking();
    TestApp {
        router: create_router(state),
        _cache: cache,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 4 * 1024 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json<T: DeserializeOwned>(app: &TestApp, uri: &str) -> (StatusCode, T) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json<T: DeserializeOwned>(app: &TestApp, uri: &str, body: Value) -> (StatusCode, T) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn itinerary_lists_every_stage() {
    let app = test_app().await;
    let (status, stages): (_, Vec<Destination>) = get_json(&app, "/api/itinerary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stages.len(), 33);
    assert_eq!(stages[0].name, "Roncesvalles");
    assert_eq!(stages[32].name, "Santiago de Compostela");
}

#[tokio::test]
async fn day_detail_starts_where_previous_day_ended() {
    let app = test_app().await;
    let (status, day): (_, DayResponse) = get_json(&app, "/api/itinerary/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day.destination.name, "Puente la Reina");
    assert_eq!(day.detail.start.unwrap().name, "Pamplona");
    assert_eq!(day.detail.end.unwrap().name, "Puente la Reina");
    assert!(day.detail.waypoints.iter().any(|w| w.name == "Alto del Perdón"));
}

#[tokio::test]
async fn unknown_day_is_not_found() {
    let app = test_app().await;
    for uri in ["/api/itinerary/0", "/api/itinerary/34", "/api/itinerary/99/route"] {
        let (status, body): (_, ApiError) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body.severity, "info");
        assert!(!body.user_message.is_empty());
    }
}

#[tokio::test]
async fn day_route_is_stitched_and_exported() {
    let app = test_app().await;
    let (status, route): (_, RouteResponse) = get_json(&app, "/api/itinerary/1/route").await;
    assert_eq!(status, StatusCode::OK);

    // Saint-Jean, Orisson, Col de Lepoeder, Roncesvalles
    let metadata = route.metadata.expect("metadata");
    assert_eq!(metadata.segment_count, 3);
    assert_eq!(metadata.point_count, 3 * 5);
    assert_eq!(route.path.len(), metadata.point_count);
    assert!((route.path[0].lat - 43.1631).abs() < 1e-9);
    assert!((metadata.end.lat - 43.0092).abs() < 1e-9);
    assert!(route.distance_km > 15.0 && route.distance_km < 30.0);
    assert!(!route.gpx_base64.is_empty());
}

#[tokio::test]
async fn focusing_a_day_updates_the_map() {
    let app = test_app().await;

    let (status, idle): (_, Value) = get_json(&app, "/api/map").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(idle["status"], "idle");

    let (status, focus): (_, FocusResponse) =
        post_json(&app, "/api/map/focus", json!({"day": 5})).await;
    assert_eq!(status, StatusCode::OK);
    let snapshot = serde_json::to_value(&focus).unwrap();
    assert_eq!(snapshot["outcome"], "success");
    assert_eq!(snapshot["snapshot"]["status"], "success");
    assert_eq!(snapshot["snapshot"]["focus"], json!({"mode": "day", "day": 5}));
    assert_eq!(
        focus.snapshot.annotations.last().map(|a| a.name.as_str()),
        Some("Estella")
    );
    assert!(focus.snapshot.path.is_some());

    let (_, current): (_, Value) = get_json(&app, "/api/map").await;
    assert_eq!(current["generation"], snapshot["snapshot"]["generation"]);
}

#[tokio::test]
async fn empty_focus_body_shows_overview() {
    let app = test_app().await;
    let (status, focus): (_, FocusResponse) = post_json(&app, "/api/map/focus", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(focus.snapshot.annotations.len(), 33);
    let viewport = focus.snapshot.viewport.expect("viewport");
    assert!(viewport.min_lon < -8.5 && viewport.max_lon > -1.3);
}

#[tokio::test]
async fn cancel_keeps_published_state() {
    let app = test_app().await;
    let (_, before): (_, FocusResponse) = post_json(&app, "/api/map/focus", json!({"day": 2})).await;
    let (status, after): (_, Value) = post_json(&app, "/api/map/cancel", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["status"], "success");
    assert_eq!(after["annotations"].as_array().unwrap().len(), before.snapshot.annotations.len());
}

#[tokio::test]
async fn translate_endpoint() {
    let app = test_app().await;
    let (status, body): (_, TranslateResponse) = post_json(
        &app,
        "/api/translate",
        json!({"text": "hello", "source": "en", "target": "es"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.translation, "hola");
    assert_eq!(body.target, "es");

    let (_, body): (_, TranslateResponse) = post_json(
        &app,
        "/api/translate",
        json!({"text": "quantum chromodynamics", "source": "en", "target": "fr"}),
    )
    .await;
    assert_eq!(body.translation, "[French] quantum chromodynamics");
}

#[tokio::test]
async fn unsupported_language_is_bad_request() {
    let app = test_app().await;
    let (status, body): (_, ApiError) = post_json(
        &app,
        "/api/translate",
        json!({"text": "hallo", "source": "de", "target": "es"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.message.contains("\"de\""));
}

#[tokio::test]
async fn nearest_stage_endpoint() {
    let app = test_app().await;
    let (status, body): (_, Value) = get_json(&app, "/api/nearest?lat=42.8868&lon=-8.4938").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["destination"]["name"], "Santiago de Compostela");
    assert!(body["distance_km"].as_f64().unwrap() < 8.0);

    let (status, _): (_, ApiError) = get_json(&app, "/api/nearest?lat=120&lon=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weather_is_fetched_then_cached() {
    let app = test_app().await;
    let (status, first): (_, Value) = get_json(&app, "/api/weather?lat=42.5987&lon=-5.5671").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["current"]["temperature_2m"], 14.0);
    assert_eq!(first["stale"], false);

    let (_, second): (_, Value) = get_json(&app, "/api/weather?lat=42.5987&lon=-5.5671").await;
    assert_eq!(second["fetched_at"], first["fetched_at"]);
}

#[tokio::test]
async fn location_reports_reach_the_tracker() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/location")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"kind":"position","lat":42.5987,"lon":-5.5671}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let mut position = Value::Null;
    for _ in 0..50 {
        let (_, state): (_, Value) = get_json(&app, "/api/location").await;
        position = state["last_position"].clone();
        if !position.is_null() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(position, json!({"lat": 42.5987, "lon": -5.5671}));
}
