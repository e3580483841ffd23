use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use geojson::FeatureCollection;

use crate::error::ApiError;
use crate::state::AppState;

/// Every query parameter is a filter on the table, in request order
pub async fn get_geojson(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let Query(params) = params?;
    tracing::info!(model = %model, filters = params.len(), "Processing geojson request");

    let collection = state.features.fetch(&model, params, state.fetch_options).await?;

    Ok(Json(collection))
}
