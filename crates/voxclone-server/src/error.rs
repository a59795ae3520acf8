//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Logs `detail` and returns a 500 carrying only the public `message`.
    pub fn internal(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        let message = message.into();
        error!("{message}: {detail}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message.as_str(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<voxclone_core::Error> for ApiError {
    fn from(err: voxclone_core::Error) -> Self {
        from_core(err, "Internal server error")
    }
}

/// Map a core error, using `context` as the public message for unexpected failures.
pub fn from_core(err: voxclone_core::Error, context: &str) -> ApiError {
    use voxclone_core::Error;

    match err {
        Error::InvalidInput(message) => ApiError::bad_request(message),
        Error::Validation(reason) => ApiError::bad_request(reason.to_string()),
        Error::ProfileNotFound => ApiError::not_found("Voice profile not found"),
        other @ (Error::AudioDecode(_) | Error::Synthesis(_)) => {
            ApiError::internal(context, other)
        }
    }
}
