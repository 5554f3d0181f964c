use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;
use tracking_application::AppState;
use tracking_domain::{Event, EventRepository, RuntimeConfig, Stream};
use tracking_infrastructure::MemoryEventRepository;
use tracking_interfaces_http::build_router;

const PEER: ([u8; 4], u16) = ([198, 51, 100, 7], 52311);

fn runtime_config(static_dir: &str) -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        static_dir: static_dir.to_string(),
        max_body_bytes: 64 * 1024,
        readiness_timeout_seconds: 5,
    }
}

fn app_with(repo: Arc<dyn EventRepository>, static_dir: &str) -> Router {
    let state = AppState::new(runtime_config(static_dir), repo);
    build_router(state).layer(MockConnectInfo(SocketAddr::from(PEER)))
}

fn memory_app() -> (Arc<MemoryEventRepository>, Router) {
    let repo = Arc::new(MemoryEventRepository::new());
    let app = app_with(repo.clone(), "./static/js");
    (repo, app)
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

struct FailingRepo;

#[async_trait]
impl EventRepository for FailingRepo {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn insert_event(&self, _event: &Event) -> anyhow::Result<()> {
        Err(anyhow!("Code: 60. DB::Exception: Table tracking.events does not exist"))
    }

    async fn insert_stream(&self, _stream: &Stream) -> anyhow::Result<()> {
        Err(anyhow!("Code: 60. DB::Exception: Table tracking.streams does not exist"))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Err(anyhow!("connection refused"))
    }
}

#[tokio::test]
async fn post_event_stores_server_assigned_fields() {
    let (repo, app) = memory_app();
    let client_uuid = "6f1c2a8e-0d0b-4c8e-8a53-1f0c7d9e2b44";
    let body = serde_json::json!({
        "name": "pageview",
        "ip": "10.0.0.1",
        "uuid": client_uuid,
        "parameters": {"path": "/pricing", "referrer": null, "viewport": [1280, 720]}
    });

    let response = app.oneshot(post("/events", body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, r#"{"status":"ok"}"#);

    let events = repo.events().await;
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.name, "pageview");
    assert_eq!(event.ip, "198.51.100.7");
    assert_ne!(event.id.to_string(), client_uuid);
    assert_eq!(event.inserted_at, event.updated_at);
    assert_eq!(event.parameters["viewport"], serde_json::json!([1280, 720]));
}

#[tokio::test]
async fn real_ip_header_wins_over_peer_address() {
    let (repo, app) = memory_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/events")
        .header("x-real-ip", "203.0.113.9")
        .body(Body::from(r#"{"name":"click"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repo.events().await[0].ip, "203.0.113.9");
}

#[tokio::test]
async fn empty_body_is_rejected_without_writing() {
    let (repo, app) = memory_app();

    let response = app.oneshot(post("/events", Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "need event data");
    assert!(repo.events().await.is_empty());
}

#[tokio::test]
async fn invalid_json_is_rejected_with_decoder_message() {
    let (repo, app) = memory_app();

    let response = app
        .clone()
        .oneshot(post("/events", r#"{"name": "pageview""#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("EOF"));

    let response = app.oneshot(post("/events", r#"{"parameters":{}}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("missing field `name`"));

    assert!(repo.events().await.is_empty());
}

#[tokio::test]
async fn unknown_stream_reference_is_accepted() {
    let (repo, app) = memory_app();
    let body = r#"{"name":"pageview","streamId":"0190b5a4-6f2e-7c3a-9d4e-1f2a3b4c5d6e"}"#;

    let response = app.oneshot(post("/events", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let events = repo.events().await;
    assert_eq!(
        events[0].stream_id.map(|id| id.to_string()).as_deref(),
        Some("0190b5a4-6f2e-7c3a-9d4e-1f2a3b4c5d6e")
    );
    assert!(repo.streams().await.is_empty());
}

#[tokio::test]
async fn concurrent_events_get_distinct_ids() {
    let (repo, app) = memory_app();

    let (first, second) = tokio::join!(
        app.clone().oneshot(post("/events", r#"{"name":"pageview"}"#)),
        app.clone().oneshot(post("/events", r#"{"name":"pageview"}"#)),
    );

    assert_eq!(first.unwrap().status(), StatusCode::OK);
    assert_eq!(second.unwrap().status(), StatusCode::OK);
    let events = repo.events().await;
    assert_eq!(events.len(), 2);
    assert_ne!(events[0].id, events[1].id);
}

#[tokio::test]
async fn initiate_returns_plain_stream_id_and_stores_stream() {
    let (repo, app) = memory_app();

    let response = app
        .clone()
        .oneshot(post("/events/initiate", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let first = body_text(response).await;
    let parsed = uuid::Uuid::parse_str(&first).expect("stream id is a uuid");

    let response = app
        .oneshot(post("/events/initiate", Body::empty()))
        .await
        .unwrap();
    let second = body_text(response).await;

    assert_ne!(first, second);
    let streams = repo.streams().await;
    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].id.0, parsed);
    assert_eq!(streams[0].inserted_at, streams[0].updated_at);
}

#[tokio::test]
async fn wrong_method_and_unknown_paths_write_nothing() {
    let (repo, app) = memory_app();

    let get_events = Request::builder()
        .uri("/events")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(get_events).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let get_initiate = Request::builder()
        .uri("/events/initiate")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(get_initiate).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .oneshot(post("/track", r#"{"name":"pageview"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(repo.events().await.is_empty());
    assert!(repo.streams().await.is_empty());
}

#[tokio::test]
async fn store_failures_answer_bad_request_with_store_message() {
    let app = app_with(Arc::new(FailingRepo), "./static/js");

    let response = app
        .clone()
        .oneshot(post("/events", r#"{"name":"pageview"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Code: 60. DB::Exception: Table tracking.events does not exist"
    );

    let response = app
        .oneshot(post("/events/initiate", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("tracking.streams"));
}

#[tokio::test]
async fn serves_tracker_scripts_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tracker.js"), "window.track = function () {};").unwrap();
    let repo = Arc::new(MemoryEventRepository::new());
    let app = app_with(repo, dir.path().to_str().unwrap());

    let request = Request::builder()
        .uri("/js/tracker.js")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "window.track = function () {};");

    let request = Request::builder()
        .uri("/js/missing.js")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn readiness_follows_store_and_metrics_count_writes() {
    let (_repo, app) = memory_app();
    let response = app
        .clone()
        .oneshot(post("/events", r#"{"name":"pageview"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ready = Request::builder()
        .uri("/ops/health/ready")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.clone().oneshot(ready).await.unwrap().status(), StatusCode::OK);

    let metrics = Request::builder()
        .uri("/ops/metrics/prometheus")
        .body(Body::empty())
        .unwrap();
    let rendered = body_text(app.oneshot(metrics).await.unwrap()).await;
    assert!(rendered.contains("tracking_events_total 1\n"));

    let failing = app_with(Arc::new(FailingRepo), "./static/js");
    let ready = Request::builder()
        .uri("/ops/health/ready")
        .body(Body::empty())
        .unwrap();
    assert_eq!(
        failing.oneshot(ready).await.unwrap().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
