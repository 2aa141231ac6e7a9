pub mod codes;
pub mod handlers;

pub use codes::{ErrorCode, ROUTE_NOT_FOUND_BODY, SERVER_ERROR_BODY};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::error::ErrorKind;
use thiserror::Error;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Application error type that can be converted to HTTP responses.
///
/// Every variant is logged with its [`ErrorCode`] and answered with a
/// plain-text body. Diagnostic detail never reaches the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] mongodb::bson::ser::Error),

    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] mongodb::bson::de::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),
}

impl AppError {
    /// Status and error code for this error, without logging
    pub fn classify(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::Mongo(e) => (StatusCode::INTERNAL_SERVER_ERROR, mongo_error_code(e)),
            AppError::BsonSerialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseEncode)
            }
            AppError::BsonDeserialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseDecode)
            }
            AppError::JsonExtractorRejection(e) => (e.status(), ErrorCode::JsonExtraction),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            AppError::UuidError(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidUuid),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::UnprocessableEntity(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::UnprocessableEntity,
            ),
        }
    }
}

/// Pick the logged error code for a driver error
fn mongo_error_code(error: &mongodb::error::Error) -> ErrorCode {
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::ConnectionPoolCleared { .. } => {
            ErrorCode::DatabaseUnavailable
        }
        ErrorKind::Io(_) => ErrorCode::DatabaseIo,
        ErrorKind::BsonSerialization(_) => ErrorCode::DatabaseEncode,
        ErrorKind::BsonDeserialization(_) => ErrorCode::DatabaseDecode,
        ErrorKind::InvalidArgument { .. } => ErrorCode::DatabaseInvalidArgument,
        _ => ErrorCode::DatabaseError,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = ?self, "{}", self);
        } else {
            tracing::info!(error_code = code.code(), "{}", self);
        }

        (status, code.default_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn into_parts(error: AppError) -> (StatusCode, String, Option<String>) {
        let response = error.into_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap(), content_type)
    }

    #[tokio::test]
    async fn test_store_failure_collapses_to_generic_500() {
        let error = mongodb::error::Error::custom("connection reset by peer");
        let (status, body, content_type) = into_parts(AppError::Mongo(error)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, SERVER_ERROR_BODY);
        assert!(content_type.unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_not_found_uses_default_message() {
        let (status, body, _) = into_parts(AppError::NotFound("User 42".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ErrorCode::NotFound.default_message());
    }

    #[tokio::test]
    async fn test_unprocessable_entity() {
        let (status, body, _) =
            into_parts(AppError::UnprocessableEntity("no address".into())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, "Request cannot be processed");
    }

    #[tokio::test]
    async fn test_bad_request() {
        let (status, body, _) = into_parts(AppError::BadRequest("bad".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Request validation failed");
    }

    #[tokio::test]
    async fn test_uuid_error() {
        let err = uuid::Uuid::parse_str("nope").unwrap_err();
        let (status, body, _) = into_parts(AppError::from(err)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid UUID format");
    }

    #[test]
    fn test_decode_failure_classification() {
        let err = mongodb::bson::from_document::<String>(mongodb::bson::doc! {}).unwrap_err();
        let (status, code) = AppError::from(err).classify();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, ErrorCode::DatabaseDecode);
    }

    #[test]
    fn test_mongo_error_codes() {
        let custom = mongodb::error::Error::custom("boom");
        assert_eq!(mongo_error_code(&custom), ErrorCode::DatabaseError);
    }
}
