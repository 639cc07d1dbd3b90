use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /health - liveness plus a database ping when backed by PostgreSQL
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    if let Some(store) = state.pg() {
        DatabaseManager::health_check(store.pool(), state.query_timeout())
            .await
            .map_err(|e| {
                tracing::error!("health check failed: {}", e);
                ApiError::service_unavailable("database unavailable")
            })?;
    }
    Ok(Json(json!({ "status": "ok" })))
}
