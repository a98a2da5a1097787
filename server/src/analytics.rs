//! Analytics boundary.
//!
//! The metrics subsystem is an external collaborator: after every request
//! the server emits one [`RequestEvent`] through [`log_request`] and
//! nothing in the core depends on the result. The default sink is the
//! `analytics` tracing target, which a collector can subscribe to.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// One request, as reported to the analytics collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEvent {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub status_code: u16,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Emits a request event on the `analytics` target.
pub fn log_request(event: &RequestEvent) {
    info!(
        target: "analytics",
        method = %event.method,
        path = %event.path,
        resource = event.resource.as_deref(),
        item_id = event.item_id.as_deref(),
        status = event.status_code,
        elapsed_ms = event.response_time_ms,
        error = event.error.as_deref(),
        "request"
    );
}

/// Router middleware: times every request and emits its event.
pub async fn track(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let (resource, item_id) = parse_api_path(&path);
    log_request(&RequestEvent {
        method,
        path,
        resource,
        item_id,
        status_code: status.as_u16(),
        response_time_ms: start.elapsed().as_millis() as u64,
        error: (status.is_client_error() || status.is_server_error())
            .then(|| status.canonical_reason().unwrap_or("error").to_string()),
    });
    response
}

/// Reserved path segments under `/api/` that are not resources.
const RESERVED: [&str; 4] = ["validate", "data", "snapshot", "config"];

fn parse_api_path(path: &str) -> (Option<String>, Option<String>) {
    let mut segments = path.trim_start_matches('/').split('/');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some("api"), Some(resource), item_id, None)
            if !resource.is_empty() && !RESERVED.contains(&resource) =>
        {
            (
                Some(resource.to_string()),
                item_id.filter(|id| !id.is_empty()).map(str::to_string),
            )
        }
        _ => (None, None),
    }
}
