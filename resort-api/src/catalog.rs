use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use resort_catalog::{InventoryUnit, ProgramOffering};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cottages", get(list_cottages))
        .route("/api/programs", get(list_programs))
}

async fn list_cottages(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryUnit>>, AppError> {
    state
        .catalog
        .list_cottages()
        .await
        .map(Json)
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
}

async fn list_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgramOffering>>, AppError> {
    state
        .catalog
        .list_programs()
        .await
        .map(Json)
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
}
