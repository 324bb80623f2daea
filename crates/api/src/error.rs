use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uiforge_pipeline::ResolveError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ResolveError`] for pipeline failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce the published
/// `{"detail": ...}` error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A pipeline failure. Surfaced to the caller as one opaque failure
    /// with a human-readable message; no partial state is exposed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Resolve(err) => {
                tracing::error!(error = %err, "Pipeline failure");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = json!({ "detail": detail });

        (status, axum::Json(body)).into_response()
    }
}
