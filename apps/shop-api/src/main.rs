use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // With MONGODB_FAIL_FAST=false an unreachable server leaves a lazy client
    // and store-backed routes answer 500 until it comes up
    let connection = database::mongodb::connect_with_policy(&config.mongodb, None).await?;
    let mongo_client = connection.client;
    let db = database::mongodb::resolve_database(&mongo_client, &config.mongodb);

    if connection.degraded {
        warn!("MongoDB database {} selected but not reachable yet", db.name());
    } else {
        info!("Using MongoDB database: {}", db.name());
    }

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    api::products::init_indexes(&state).await;

    let api_routes = api::routes(&state);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    let app = router.merge(health_router(state.config.app));

    let mongo_client = state.mongo_client.clone();

    info!("Starting Shop API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}
