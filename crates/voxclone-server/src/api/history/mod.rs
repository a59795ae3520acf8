//! Generation history routes.

mod handlers;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/history",
        get(handlers::list_history).post(handlers::seed_history),
    )
}
