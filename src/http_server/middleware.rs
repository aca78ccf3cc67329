//! Request logging middleware
//!
//! Tags every response with an `x-request-id`, counts it, and writes one
//! `HTTP_REQUEST` log line.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::{Event, Logger, MetricsRegistry, Severity};

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log and count each request
pub async fn log_requests(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let failed = status.is_client_error() || status.is_server_error();
    metrics.record_request(failed);

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let severity = if status.is_server_error() {
        Severity::Error
    } else if failed {
        Severity::Warn
    } else {
        Severity::Info
    };
    if Logger::enabled(severity) {
        let status = status.as_u16().to_string();
        let elapsed_ms = started.elapsed().as_millis().to_string();
        Logger::log(
            severity,
            Event::HttpRequest.as_str(),
            &[
                ("elapsed_ms", elapsed_ms.as_str()),
                ("method", method.as_str()),
                ("path", path.as_str()),
                ("request_id", request_id.as_str()),
                ("status", status.as_str()),
            ],
        );
    }

    response
}
