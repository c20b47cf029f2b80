use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{AppError, AppResult, AppState};

#[utoipa::path(
    get,
    path = "/healthcheck",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    state.database.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "database ping failed");
        AppError::ServiceUnavailable("failed to query postgres".to_string())
    })?;

    Ok(Json(json!({
        "status": "ok"
    })))
}
