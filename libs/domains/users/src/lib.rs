//! Users Domain
//!
//! Users and the single address each of them owns, stored in two MongoDB
//! collections and linked by id.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Two-collection writes, cascade delete
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + MongoDB implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, request/response bodies
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     mongodb::{MongoAddressRepository, MongoUserRepository},
//!     service::UserService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let service = UserService::new(
//!     MongoUserRepository::new(&db),
//!     MongoAddressRepository::new(&db),
//! );
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, USER_CREATED_ACK};
pub use models::{
    Address, CreateAddress, CreateUser, CreateUserRequest, UpdateAddress, UpdateUser,
    UpdateUserRequest, User, UserDeleteResponse, UserUpdateResponse, UserWithAddress,
};
pub use mongodb::{MongoAddressRepository, MongoUserRepository};
pub use repository::{AddressRepository, UserRepository};
pub use service::UserService;
