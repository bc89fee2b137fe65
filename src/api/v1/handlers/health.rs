/*
 * Responsibility
 * - GET /health (liveness probe)
 * - Registered outside the token middleware; probes carry no credential
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
