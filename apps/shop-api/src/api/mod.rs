//! API routes module

pub mod health;
pub mod products;
pub mod users;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Body of `GET /`
pub const ROOT_BODY: &str = "Everything OK here";

/// Create all API routes, merged at the root by `axum_helpers::create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/product", products::router(state))
        .nest("/user", users::router(state))
        .merge(health::router(state.clone()))
}

async fn root() -> &'static str {
    ROOT_BODY
}
