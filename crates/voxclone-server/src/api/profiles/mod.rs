//! Voice profile routes: upload, listing, lookup, sample playback and deletion.

mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use voxclone_core::audio::validation::MAX_UPLOAD_BYTES;

use crate::state::AppState;

/// Room for the JSON fields and multipart framing around the audio payload.
const UPLOAD_ENVELOPE_ALLOWANCE_BYTES: usize = 1024 * 1024;

/// Large enough for an over-limit sample sent as base64 JSON to reach validation and be
/// reported as too large.
pub(crate) const AUDIO_UPLOAD_LIMIT_BYTES: usize =
    ((MAX_UPLOAD_BYTES as usize) + 1).div_ceil(3) * 4 + UPLOAD_ENVELOPE_ALLOWANCE_BYTES;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(handlers::upload_voice_profile)
                .layer(DefaultBodyLimit::max(AUDIO_UPLOAD_LIMIT_BYTES)),
        )
        .route(
            "/profiles",
            get(handlers::list_voice_profiles).post(handlers::seed_voice_profiles),
        )
        .route(
            "/profiles/:profile_id",
            get(handlers::get_voice_profile).delete(handlers::delete_voice_profile),
        )
        .route(
            "/profiles/:profile_id/audio",
            get(handlers::get_voice_profile_audio),
        )
}
