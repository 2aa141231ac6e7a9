//! MongoDB connection management shared by the shop services
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health checks and id helpers
//! - `config` - Load [`mongodb::MongoConfig`] through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, connect_with_policy, resolve_database};
//!
//! let config = MongoConfig::from_env()?;
//! let connection = connect_with_policy(&config, None).await?;
//! let db = resolve_database(&connection.client, &config);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
