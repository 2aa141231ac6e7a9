use mongodb::{Client, Database, options::ClientOptions};
use std::time::Duration;
use tracing::{info, warn};

use super::{MongoConfig, config::FALLBACK_DATABASE, health::ping};
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Parse the connection string and apply pool/timeout settings from `config`
async fn client_options(config: &MongoConfig) -> DatabaseResult<ClientOptions> {
    let mut options = ClientOptions::parse(config.url.as_str()).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Build a client without contacting the server.
///
/// The driver connects lazily on the first operation, so this only fails on
/// a malformed connection string.
pub async fn client_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    let options = client_options(config).await?;
    Ok(Client::with_options(options)?)
}

/// Connect using a MongoConfig and verify the server answers a ping
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Attempting to connect to MongoDB at {}", config.url);

    let client = client_from_config(config).await?;

    ping(&client)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect from config with automatic retry on failure
///
/// `None` uses the default [`RetryConfig`].
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(retry) => retry_with_backoff(|| connect_from_config(config), retry).await,
        None => retry(|| connect_from_config(config)).await,
    }
}

/// Client handed back by [`connect_with_policy`]
#[derive(Debug, Clone)]
pub struct PolicyConnection {
    pub client: Client,
    /// The server did not answer at startup and the client connects lazily
    pub degraded: bool,
}

/// Connect honoring [`MongoConfig::fail_fast`].
///
/// Fail-fast returns the connection error. Otherwise the error is logged
/// and a lazily-connecting client is returned, marked degraded, so the
/// service can start anyway.
pub async fn connect_with_policy(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<PolicyConnection> {
    match connect_from_config_with_retry(config, retry_config).await {
        Ok(client) => Ok(PolicyConnection {
            client,
            degraded: false,
        }),
        Err(e) if config.fail_fast => Err(e),
        Err(e) => {
            warn!(
                error = %e,
                "MongoDB unreachable at startup, continuing in degraded mode (MONGODB_FAIL_FAST=false)"
            );
            Ok(PolicyConnection {
                client: client_from_config(config).await?,
                degraded: true,
            })
        }
    }
}

/// Pick the database: explicit config, then the connection string's default,
/// then [`FALLBACK_DATABASE`].
pub fn resolve_database(client: &Client, config: &MongoConfig) -> Database {
    match config.database {
        Some(ref name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(FALLBACK_DATABASE)),
    }
}
