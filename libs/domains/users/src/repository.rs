use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{Address, CreateAddress, UpdateAddress, UpdateUser, User, UserWithAddress};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, address references left unresolved
    async fn list(&self) -> UserResult<Vec<User>>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// User with the referenced address embedded
    async fn get_with_address(&self, id: Uuid) -> UserResult<Option<UserWithAddress>>;

    async fn create(&self, user: User) -> UserResult<User>;

    /// Apply the set fields of `patch`, returning the updated record
    async fn update(&self, id: Uuid, patch: UpdateUser) -> UserResult<Option<User>>;

    /// Remove the user, returning the removed record
    async fn delete(&self, id: Uuid) -> UserResult<Option<User>>;
}

/// Repository trait for Address persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert an address under a fresh id
    async fn create(&self, input: CreateAddress) -> UserResult<Address>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<Address>>;

    /// Apply the set fields of `patch`, returning the updated record
    async fn update_by_id(&self, id: Uuid, patch: UpdateAddress) -> UserResult<Option<Address>>;

    /// Remove the address, returning the removed record
    async fn delete_by_id(&self, id: Uuid) -> UserResult<Option<Address>>;
}
