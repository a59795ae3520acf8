use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::envelope::ApiResponse;
use crate::api::request_context::RequestContext;
use crate::error::{from_core, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub voice_profile_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub audio_url: String,
    pub history_id: String,
}

pub async fn generate_voice(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<GenerateResponse>>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        ApiError::bad_request(format!("Invalid JSON payload: {}", rejection.body_text()))
    })?;
    let voice_profile_id = req.voice_profile_id.unwrap_or_default();
    let text = req.text.unwrap_or_default();

    info!(
        correlation_id = %ctx.correlation_id,
        voice_profile_id = %voice_profile_id,
        chars = text.chars().count(),
        "Generation requested"
    );

    let outcome = state
        .generation
        .generate(&voice_profile_id, &text)
        .await
        .map_err(|err| from_core(err, "Failed to generate voice"))?;

    let message = if outcome.demo_mode {
        "Voice generated successfully (demo mode)"
    } else {
        "Voice generated successfully"
    };

    Ok(Json(ApiResponse::ok(
        GenerateResponse {
            audio_url: outcome.audio_url,
            history_id: outcome.history_id,
        },
        message,
    )))
}
