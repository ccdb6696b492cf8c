use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_error: Option<String>,
    pool_size: u32,
    pool_idle: usize,
}

/// Health check endpoint
///
/// Pings the database with a 5 second timeout and reports pool utilization.
/// Returns 200 OK when the database answers, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let ping = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        sqlx::query("SELECT 1").execute(&state.db_pool),
    )
    .await;

    let database_error = match ping {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("query failed: {}", e)),
        Err(_) => Some("query timeout (>5s)".to_string()),
    };

    let healthy = database_error.is_none();
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            database: if healthy { "ok" } else { "error" }.to_string(),
            database_error,
            pool_size: state.db_pool.size(),
            pool_idle: state.db_pool.num_idle(),
        }),
    )
}
