use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::dto::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    state.health.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Health check failed");
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Store unavailable").with_details(e.to_string())
    })?;

    Ok(Json(HealthResponse::ok(state.backend)))
}
