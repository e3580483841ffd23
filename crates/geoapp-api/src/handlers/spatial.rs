use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use geoapp_core::models::SpatialPointResult;

use crate::dto::SpatialDataParams;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn spatial_data(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SpatialDataParams>, QueryRejection>,
) -> Result<Json<SpatialPointResult>, ApiError> {
    let Query(params) = params?;
    tracing::info!(x = ?params.x, y = ?params.y, "Processing spatial data request");

    let result = state.analyzer.analyze_raw(params.x.as_deref(), params.y.as_deref()).await?;

    Ok(Json(result))
}
