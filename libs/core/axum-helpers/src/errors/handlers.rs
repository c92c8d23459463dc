use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Router fallback for unknown routes.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    let body = ErrorResponse::new(
        ErrorCode::NotFound,
        format!("No route for {}", uri.path()),
    );

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Fallback for known paths hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    let body = ErrorResponse::new(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
    );

    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}
