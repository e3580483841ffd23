use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Catalogue
        .route("/api/tables", get(handlers::list_tables))

        // Retrieval and analytics
        .route("/api/spatial_data", get(handlers::spatial_data))
        .route("/api/{model}/geojson", get(handlers::get_geojson))

        .with_state(state)
}
