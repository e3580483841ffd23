use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::TableInfo;
use crate::state::AppState;

pub async fn list_tables(State(state): State<Arc<AppState>>) -> Json<Vec<TableInfo>> {
    Json(state.features.catalogue().list().map(TableInfo::from).collect())
}
