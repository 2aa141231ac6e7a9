//! Users API routes

use axum::Router;
use domain_users::{MongoAddressRepository, MongoUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = UserService::new(
        MongoUserRepository::new(&state.db),
        MongoAddressRepository::new(&state.db),
    );
    handlers::router(service)
}
