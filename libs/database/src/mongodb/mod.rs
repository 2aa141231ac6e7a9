//! MongoDB database connector and utilities
//!
//! Provides connection management, a ping check and id encoding helpers.

mod config;
mod connector;
mod health;
pub mod ids;

pub use config::{FALLBACK_DATABASE, MongoConfig};
pub use connector::{
    client_from_config, connect_from_config, connect_from_config_with_retry, connect_with_policy,
    PolicyConnection, resolve_database,
};
pub use health::ping;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
