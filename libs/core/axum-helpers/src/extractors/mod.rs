//! Custom extractors for Axum handlers.
//!
//! Rejections are [`AppError`](crate::errors::AppError)s, so malformed input
//! gets the same plain-text treatment as every other error.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
