//! Router-level tests for the JSON API and static hosting.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use crisis_hub_core::Result;
use crisis_hub_dialogue::{DialogueEngine, InMemorySessionStore};
use crisis_hub_resources::{
    AmenityFinder, Coordinates, Geocoder, LookupError, Place, Resource, ResourceLookup, Upstream,
};
use crisis_hub_server::app::router;
use crisis_hub_server::config::{SessionConfig, SiteConfig};
use crisis_hub_server::state::AppState;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct FakeGeocoder;

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Place>, LookupError> {
        match query {
            "Pune" => Ok(Some(Place {
                name: Some("Pune, Maharashtra, India".to_string()),
                location: Coordinates::new(18.52, 73.85),
            })),
            "Thar" => Ok(Some(Place {
                name: None,
                location: Coordinates::new(27.0, 71.0),
            })),
            "Busy" => Err(LookupError::RateLimited {
                upstream: Upstream::Nominatim,
                retry_after_ms: 400,
            }
            .into()),
            "Broken" => Err(LookupError::ConnectionFailed {
                upstream: Upstream::Nominatim,
                reason: "dns failure".to_string(),
            }
            .into()),
            _ => Ok(None),
        }
    }
}

struct FakeFinder;

#[async_trait]
impl AmenityFinder for FakeFinder {
    async fn nearby(
        &self,
        center: Coordinates,
        _radius_meters: u32,
    ) -> Result<Vec<Resource>, LookupError> {
        if center.lat > 20.0 {
            return Ok(Vec::new());
        }
        let tags = HashMap::from([
            ("name".to_string(), "Sassoon General Hospital".to_string()),
            ("amenity".to_string(), "hospital".to_string()),
            ("website".to_string(), "https://sassoonhospital.org".to_string()),
        ]);
        Ok(vec![
            Resource::from_tags(1, Coordinates::new(18.53, 73.87), &tags),
            Resource::from_tags(2, Coordinates::new(18.51, 73.84), &HashMap::new()),
        ])
    }
}

struct TestApp {
    router: Router,
    _site: TempDir,
}

fn app() -> TestApp {
    let site = tempfile::tempdir().expect("tempdir");
    std::fs::write(site.path().join("index.html"), "<h1>Crisis Resource Hub</h1>").expect("write");

    let state = Arc::new(AppState::new(
        DialogueEngine::default(),
        Arc::new(InMemorySessionStore::new(chrono::Duration::minutes(30))),
        ResourceLookup::new(Arc::new(FakeGeocoder), Arc::new(FakeFinder)),
        SessionConfig {
            secure_cookies: false,
            ..SessionConfig::default()
        },
        SiteConfig::default(),
    ));

    TestApp {
        router: router(state, site.path()),
        _site: site,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("chat_session=") || v.starts_with("theme="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, cookie, body)
}

fn post_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

async fn start(app: &TestApp) -> String {
    let (status, cookie, body) = send(app, post_json("/api/chat/session", None, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["messages"][0]["text"].as_str().unwrap().starts_with("Hi!"));
    cookie.expect("session cookie")
}

#[tokio::test]
async fn chat_flow_discloses_helpline() {
    let app = app();
    let cookie = start(&app).await;

    let (status, _, body) = send(
        &app,
        post_json("/api/chat/message", Some(&cookie), json!({ "text": "homelessness" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_session"], false);
    assert_eq!(body["state"]["step"], "awaiting_emergency_confirmation");
    assert_eq!(body["state"]["category"], "homelessness");

    let (_, _, body) = send(
        &app,
        post_json("/api/chat/message", Some(&cookie), json!({ "text": "no" })),
    )
    .await;
    assert_eq!(body["state"]["step"], "awaiting_crisis");
    assert!(
        body["messages"][0]["text"]
            .as_str()
            .unwrap()
            .contains("NULM Shelter Info: 011-23062852 | Local Police: 100")
    );
}

#[tokio::test]
async fn distress_is_reported() {
    let app = app();
    let cookie = start(&app).await;

    let (_, _, body) = send(
        &app,
        post_json("/api/chat/message", Some(&cookie), json!({ "text": "I feel hopeless" })),
    )
    .await;

    assert_eq!(body["distress_override"], true);
    assert_eq!(body["sentiment"], -2.0);
    assert_eq!(body["state"]["step"], "awaiting_distress_confirmation");
}

#[tokio::test]
async fn message_without_session_starts_one() {
    let app = app();

    let (status, cookie, body) = send(
        &app,
        post_json("/api/chat/message", None, json!({ "text": "mental health" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_session"], true);
    assert_eq!(body["state"]["category"], "mental_health");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0]["text"].as_str().unwrap().starts_with("Hi!"));
    assert_eq!(messages[1]["text"], "Is this an emergency? (Yes/No)");
    assert!(cookie.is_some());
}

#[tokio::test]
async fn transcript_records_exchange() {
    let app = app();
    let cookie = start(&app).await;
    send(
        &app,
        post_json("/api/chat/message", Some(&cookie), json!({ "text": "language" })),
    )
    .await;

    let (status, _, body) = send(&app, get("/api/chat/transcript", Some(&cookie))).await;

    assert_eq!(status, StatusCode::OK);
    let transcript = body["transcript"].as_array().unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1]["speaker"], "user");
    assert_eq!(transcript[1]["text"], "language");
    assert_eq!(body["state"]["step"], "awaiting_language");
}

#[tokio::test]
async fn transcript_without_session_is_404() {
    let app = app();
    let (status, _, _) = send(&app, get("/api/chat/transcript", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn overlong_message_is_rejected() {
    let app = app();
    let text = "a".repeat(1001);
    let (status, _, _) = send(&app, post_json("/api/chat/message", None, json!({ "text": text }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resource_search_returns_cards() {
    let app = app();
    let (status, _, body) = send(&app, get("/api/resources?location=Pune", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"]["name"], "Pune, Maharashtra, India");
    assert_eq!(body["resources"][0]["name"], "Sassoon General Hospital");
    assert_eq!(body["resources"][0]["type"], "hospital");
    assert_eq!(body["resources"][1]["name"], "Unnamed Resource");
    assert_eq!(body["resources"][0]["website"], "https://sassoonhospital.org");
    assert_eq!(body["resources"][1]["phone"], "Phone not available");
    assert!(body["resources"][1].get("website").is_none());
    assert!(body.get("notice").is_none());
}

#[tokio::test]
async fn empty_neighbourhood_has_notice() {
    let app = app();
    let (status, _, body) = send(&app, get("/api/resources?location=Thar", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resources"], json!([]));
    assert_eq!(body["notice"], "No resources found nearby.");
}

#[tokio::test]
async fn unknown_location_is_404_with_notice() {
    let app = app();
    let (status, _, body) = send(&app, get("/api/resources?location=Atlantis", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Location not found in India. Please try again.");
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let app = app();
    let (status, _, _) = send(&app, get("/api/resources?location=Broken", None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn local_rate_limit_is_429() {
    let app = app();
    let response = app
        .router
        .clone()
        .oneshot(get("/api/resources?location=Busy", None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()[header::RETRY_AFTER], "1");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["retry_after_ms"], 400);
}

#[tokio::test]
async fn blank_location_is_bad_request() {
    let app = app();
    let (status, _, _) = send(&app, get("/api/resources?location=%20", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn theme_toggle_persists_in_cookie() {
    let app = app();

    let (_, _, body) = send(&app, get("/api/theme", None)).await;
    assert_eq!(body["theme"], "light");

    let (_, cookie, body) = send(&app, post_json("/api/theme/toggle", None, json!({}))).await;
    assert_eq!(body["theme"], "dark");
    let cookie = cookie.expect("theme cookie");
    assert_eq!(cookie, "theme=dark");

    let (_, _, body) = send(&app, post_json("/api/theme/toggle", Some(&cookie), json!({}))).await;
    assert_eq!(body["theme"], "light");
}

#[tokio::test]
async fn site_metadata_has_map_defaults() {
    let app = app();
    let (status, _, body) = send(&app, get("/api/site", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["center_lat"], 20.5937);
    assert_eq!(body["zoom"], 5);
    assert_eq!(body["share_title"], "Crisis Resource Hub");
}

#[tokio::test]
async fn static_page_is_served() {
    let app = app();
    let response = app
        .router
        .clone()
        .oneshot(get("/", None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert!(String::from_utf8_lossy(&bytes).contains("Crisis Resource Hub"));
}

#[tokio::test]
async fn health_check() {
    let app = app();
    let response = app
        .router
        .clone()
        .oneshot(get("/health", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
