//! Shared application state passed to the route builders.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the client shares its connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// MongoDB client, used by the readiness check
    pub mongo_client: Client,
    /// Database every collection lives in
    pub db: Database,
}
