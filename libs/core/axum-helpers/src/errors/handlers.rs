use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::ErrorCode;

/// Fallback for requests that match no route.
///
/// Axum calls this only after every registered route failed to match.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    tracing::info!(
        error_code = ErrorCode::RouteNotFound.code(),
        %method,
        %uri,
        "No route matched"
    );

    (
        StatusCode::NOT_FOUND,
        ErrorCode::RouteNotFound.default_message(),
    )
        .into_response()
}
