//! Speech generation against a stored voice profile.

mod handlers;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(handlers::generate_voice))
}
