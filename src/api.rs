//! HTTP endpoint for GitHub webhook callbacks
//!
//! Builds the axum application: the webhook route plus a root health probe.
//!
//! ## Endpoint Map
//!
//! | Route                  | Description                         |
//! |------------------------|-------------------------------------|
//! | `GET /health`          | Load balancer health probe          |
//! | `POST {webhook_path}`  | GitHub webhook receiver (relays)    |
//!
//! The webhook handler acknowledges GitHub unconditionally: relay failures
//! are logged and never surface in the inbound response. Only a body that
//! is not valid JSON is rejected, with a 400.

use crate::format::MessageFormatter;
use crate::telegram::Notifier;
use crate::webhook::{EventKind, WebhookEvent};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Header GitHub tags each delivery with
pub const GITHUB_EVENT_HEADER: &str = "x-github-event";

/// Shared application state. Read-only after construction, so concurrent
/// requests need no synchronization.
#[derive(Clone)]
pub struct AppState {
    pub formatter: Arc<MessageFormatter>,
    pub notifier: Arc<dyn Notifier>,
}

/// Build the gitgram HTTP application
pub fn build_app(state: AppState, webhook_path: &str) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(webhook_path, post(github_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let payload: serde_json::Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Rejecting webhook with malformed JSON body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": {"code": "BAD_PAYLOAD", "message": e.to_string()}
                })),
            );
        }
    };

    // GitHub names the event in a header; a delivery without one is
    // treated as the initial ping.
    let kind = headers
        .get(GITHUB_EVENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(EventKind::parse)
        .unwrap_or(EventKind::Ping);

    tracing::debug!(event = kind.as_str(), "Received webhook delivery");

    let event = WebhookEvent::new(kind, payload);
    let message = state.formatter.render(&event);

    // The acknowledgment to GitHub does not depend on relay outcome.
    if let Err(e) = state.notifier.send(message).await {
        tracing::warn!(channel = state.notifier.name(), "Relay failed: {}", e);
    }

    let body = if matches!(event.kind(), EventKind::Ping) {
        serde_json::json!({"msg": "pong"})
    } else {
        serde_json::json!({"ok": true})
    };
    (StatusCode::OK, Json(body))
}
