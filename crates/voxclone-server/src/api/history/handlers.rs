use axum::{extract::State, Json};
use tracing::info;
use voxclone_core::store::sample_history;
use voxclone_core::GenerationRecord;

use crate::api::envelope::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GenerationRecord>>>, ApiError> {
    let records = state.history.list().await?;
    Ok(Json(ApiResponse::ok(
        records,
        "Generation history retrieved successfully",
    )))
}

pub async fn seed_history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GenerationRecord>>>, ApiError> {
    let samples = sample_history();
    if state.history.seed(samples.clone()).await? {
        info!(count = samples.len(), "Seeded sample generation history");
    }
    Ok(Json(ApiResponse::ok(samples, "Sample history created")))
}
