//! Request logging middleware.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use log::{error, info, warn};
use std::time::Instant;

/// Logs method, matched route, status and latency for every request.
///
/// Logs the matched route template, not the raw URI, so path parameter
/// values stay out of the logs.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started_at.elapsed().as_millis();
    if response.status().is_server_error() {
        error!("event=http_request module=api status={status} method={method} route={route} latency_ms={latency_ms}");
    } else if response.status().is_client_error() {
        warn!("event=http_request module=api status={status} method={method} route={route} latency_ms={latency_ms}");
    } else {
        info!("event=http_request module=api status={status} method={method} route={route} latency_ms={latency_ms}");
    }

    response
}
