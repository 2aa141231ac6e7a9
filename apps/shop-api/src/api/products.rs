//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    handlers::router(ProductService::new(repository))
}

/// Create the price index used by the sorted listing
pub async fn init_indexes(state: &AppState) {
    if let Err(e) = MongoProductRepository::new(&state.db).init_indexes().await {
        tracing::warn!(error = %e, "Could not create product indexes");
    }
}
