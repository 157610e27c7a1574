//! HTTP API surface.

pub mod employees;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// All routes, without state or middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(employees::router())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": roster_core::core_version(),
    }))
}
