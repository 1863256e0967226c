use axum::Json;
use serde_json::{Value, json};

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for `GET /readyz` — readiness check (override per service as needed).
pub async fn readyz() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}
