//! Type-safe error codes for structured logs.
//!
//! Each error code includes:
//! - String representation (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message, used as the plain-text response body
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};

/// Body returned for every server-side failure. Details go to the log only.
pub const SERVER_ERROR_BODY: &str = "There was an error!, check the console";

/// Body returned for unmatched routes
pub const ROUTE_NOT_FOUND_BODY: &str = "This route does not exist";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID format in path parameter
    InvalidUuid,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request payload is semantically incorrect
    UnprocessableEntity,

    /// No route matched the request
    RouteNotFound,

    // Database errors (2000-2999)
    /// Server selection failed or the pool was cleared
    DatabaseUnavailable,

    /// Database rejected a command
    DatabaseError,

    /// Database I/O error
    DatabaseIo,

    /// Failed to decode a stored document
    DatabaseDecode,

    /// Failed to encode a document or filter
    DatabaseEncode,

    /// Invalid driver argument (e.g. malformed filter)
    DatabaseInvalidArgument,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseIo => "DATABASE_IO",
            Self::DatabaseDecode => "DATABASE_DECODE",
            Self::DatabaseEncode => "DATABASE_ENCODE",
            Self::DatabaseInvalidArgument => "DATABASE_INVALID_ARGUMENT",
        }
    }

    /// Integer code for logs and metrics.
    ///
    /// Ranges:
    /// - 1000-1999: Client errors
    /// - 2000-2999: Database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::UnprocessableEntity => 1009,
            Self::RouteNotFound => 1012,

            Self::DatabaseError => 2003,
            Self::DatabaseIo => 2004,
            Self::DatabaseDecode => 2010,
            Self::DatabaseEncode => 2011,
            Self::DatabaseUnavailable => 2013,
            Self::DatabaseInvalidArgument => 2017,
        }
    }

    /// Plain-text body sent to the client.
    ///
    /// Server-side codes all share [`SERVER_ERROR_BODY`].
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::UnprocessableEntity => "Request cannot be processed",
            Self::RouteNotFound => ROUTE_NOT_FOUND_BODY,
            Self::DatabaseUnavailable
            | Self::DatabaseError
            | Self::DatabaseIo
            | Self::DatabaseDecode
            | Self::DatabaseEncode
            | Self::DatabaseInvalidArgument => SERVER_ERROR_BODY,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::DatabaseError.as_str(), "DATABASE_ERROR");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
        assert_eq!(ErrorCode::RouteNotFound.code(), 1012);
    }

    #[test]
    fn test_server_side_codes_share_generic_body() {
        for code in [
            ErrorCode::DatabaseUnavailable,
            ErrorCode::DatabaseDecode,
            ErrorCode::DatabaseInvalidArgument,
        ] {
            assert_eq!(code.default_message(), SERVER_ERROR_BODY);
        }
    }

    #[test]
    fn test_route_not_found_message() {
        assert_eq!(
            ErrorCode::RouteNotFound.default_message(),
            "This route does not exist"
        );
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InvalidUuid).unwrap();
        assert_eq!(json, "\"INVALID_UUID\"");
    }
}
