//! Integration test: stock session activation against a live in-process backend.
//!
//! ## Scenarios
//! 1. Success: `Idle → Pending → Ready`, payload `{"stockName": ...}` with JSON content type.
//! 2. Rejection with `detail`: error is the detail verbatim.
//! 3. Rejection without `detail` / non-JSON body: generic fallback.
//! 4. Connection refused: back to `Idle` with the transport message.
//! 5. Blank identifiers: no request reaches the backend.
//! 6. Timeout and abort settle the flow instead of hanging.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use compound_core::{
    ActivationOutcome, DashboardConfig, HttpStockBackend, SessionActivator, SessionPhase,
    REJECTED_FALLBACK,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers: fake backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SeenRequest {
    content_type: Option<String>,
    body: serde_json::Value,
}

type Seen = Arc<Mutex<Vec<SeenRequest>>>;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn activator_for(base_url: &str) -> SessionActivator<HttpStockBackend> {
    let config = DashboardConfig {
        backend_url: base_url.to_string(),
        ..DashboardConfig::default()
    };
    SessionActivator::new(Arc::new(HttpStockBackend::from_config(&config)))
}

async fn recording_backend(status: StatusCode, reply: serde_json::Value) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(
            "/api/process-stock",
            post(
                move |State(seen): State<Seen>, headers: HeaderMap, body: String| {
                    let reply = reply.clone();
                    async move {
                        let content_type = headers
                            .get(header::CONTENT_TYPE)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
                        seen.lock().unwrap().push(SeenRequest { content_type, body });
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(Arc::clone(&seen));
    (spawn_backend(router).await, seen)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_reaches_ready_and_sends_stock_name() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let (url, seen) = recording_backend(StatusCode::OK, json!({"status": "processed"})).await;
    let mut activator = activator_for(&url);

    let outcome = activator.activate("AAPL").await;

    assert_eq!(outcome, ActivationOutcome::Ready);
    assert_eq!(activator.phase(), SessionPhase::Ready);
    assert!(activator.state().error().is_none());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].body, json!({"stockName": "AAPL"}));
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn rejection_surfaces_detail_verbatim() {
    let (url, seen) =
        recording_backend(StatusCode::NOT_FOUND, json!({"detail": "Stock not found"})).await;
    let mut activator = activator_for(&url);

    let outcome = activator.activate("ZZZZ").await;

    assert_eq!(outcome, ActivationOutcome::Failed("Stock not found".to_string()));
    assert_eq!(activator.phase(), SessionPhase::Idle);
    assert_eq!(activator.state().error(), Some("Stock not found"));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn rejection_without_detail_uses_fallback() {
    let (url, _seen) =
        recording_backend(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;
    let mut activator = activator_for(&url);

    activator.activate("AAPL").await;

    assert_eq!(activator.phase(), SessionPhase::Idle);
    assert_eq!(activator.state().error(), Some(REJECTED_FALLBACK));
}

#[tokio::test]
async fn non_json_rejection_uses_fallback() {
    let router = Router::new().route(
        "/api/process-stock",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down").into_response() }),
    );
    let url = spawn_backend(router).await;
    let mut activator = activator_for(&url);

    activator.activate("AAPL").await;

    assert_eq!(activator.state().error(), Some(REJECTED_FALLBACK));
}

#[tokio::test]
async fn connection_refused_returns_to_idle() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let mut activator = activator_for(&format!("http://{}", addr));

    let outcome = activator.activate("AAPL").await;

    assert!(matches!(outcome, ActivationOutcome::Failed(_)));
    assert_eq!(activator.phase(), SessionPhase::Idle);
    let error = activator.state().error().unwrap();
    assert!(!error.is_empty());
    assert_ne!(error, REJECTED_FALLBACK);
}

#[tokio::test]
async fn blank_identifiers_issue_no_request() {
    let (url, seen) = recording_backend(StatusCode::OK, json!({})).await;
    let mut activator = activator_for(&url);

    for blank in ["", "   ", "\t"] {
        assert_eq!(activator.activate(blank).await, ActivationOutcome::Skipped);
        assert_eq!(activator.phase(), SessionPhase::Idle);
    }
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn ready_flow_ignores_further_activations() {
    let (url, seen) = recording_backend(StatusCode::OK, json!({})).await;
    let mut activator = activator_for(&url);

    assert_eq!(activator.activate("AAPL").await, ActivationOutcome::Ready);
    assert_eq!(activator.activate("MSFT").await, ActivationOutcome::Skipped);
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(activator.state().identifier(), "AAPL");
}

#[tokio::test]
async fn slow_backend_times_out_when_configured() {
    let router = Router::new().route(
        "/api/process-stock",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let url = spawn_backend(router).await;
    let mut activator = activator_for(&url).with_timeout(Some(Duration::from_millis(100)));

    let outcome = activator.activate("AAPL").await;

    assert_eq!(
        outcome,
        ActivationOutcome::Failed("Request timed out after 100ms".to_string())
    );
    assert!(!activator.state().is_pending());
}

#[tokio::test]
async fn abort_signal_cancels_in_flight_request() {
    let router = Router::new().route(
        "/api/process-stock",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let url = spawn_backend(router).await;
    let mut activator = activator_for(&url);
    let (abort_tx, abort_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = abort_tx.send(());
    });
    let outcome = activator
        .activate_with_abort("AAPL", async {
            let _ = abort_rx.await;
        })
        .await;

    assert_eq!(outcome, ActivationOutcome::Failed("Request cancelled".to_string()));
    assert_eq!(activator.phase(), SessionPhase::Idle);
}
