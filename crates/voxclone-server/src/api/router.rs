use axum::{extract::Request, middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::api::request_context::{attach_request_context, correlation_id_from};
use crate::state::AppState;

/// Build the public router; every route sits at the root.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = correlation_id_from(request.headers()).unwrap_or_else(|| "-".into());
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            correlation_id = %request_id
        )
    });

    Router::new()
        .merge(crate::api::internal::router())
        .merge(crate::api::profiles::router())
        .merge(crate::api::generate::router())
        .merge(crate::api::history::router())
        .layer(trace_layer)
        .layer(middleware::from_fn(attach_request_context))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
