use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Address not found: {0}")]
    AddressNotFound(Uuid),

    #[error("User {0} has no address to update")]
    MissingAddress(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Failed to decode document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::AddressNotFound(id) => {
                AppError::NotFound(format!("Address {} not found", id))
            }
            UserError::MissingAddress(id) => {
                AppError::UnprocessableEntity(format!("User {} has no address", id))
            }
            UserError::Database(e) => AppError::Mongo(e),
            UserError::Encode(e) => AppError::BsonSerialization(e),
            UserError::Decode(e) => AppError::BsonDeserialization(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let id = Uuid::now_v7();

        assert_eq!(
            UserError::NotFound(id).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::AddressNotFound(id).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::MissingAddress(id).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            UserError::Database(mongodb::error::Error::custom("down"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
