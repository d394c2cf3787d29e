use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /health/ready
/// Readiness probe verifying database connectivity
pub async fn readiness_handler(
    State(pool): State<Arc<PgPool>>,
) -> Result<Json<Value>, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(pool.as_ref())
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(json!({ "status": "ready" })))
}
