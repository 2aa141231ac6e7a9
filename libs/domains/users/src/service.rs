//! User Service - orchestrates the User and Address repositories

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUserRequest, UpdateUserRequest, User, UserDeleteResponse, UserUpdateResponse,
    UserWithAddress,
};
use crate::repository::{AddressRepository, UserRepository};

/// User service providing the combined User + Address operations
///
/// The two writes of each operation are not atomic. Creation compensates a
/// failed user insert by removing the address it just wrote.
pub struct UserService<U: UserRepository, A: AddressRepository> {
    users: Arc<U>,
    addresses: Arc<A>,
}

impl<U: UserRepository, A: AddressRepository> UserService<U, A> {
    pub fn new(users: U, addresses: A) -> Self {
        Self {
            users: Arc::new(users),
            addresses: Arc::new(addresses),
        }
    }

    /// List users without resolving addresses
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.users.list().await
    }

    /// Get a user with its address embedded
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserWithAddress> {
        self.users
            .get_with_address(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Create the address, then the user referencing it
    #[instrument(skip(self, request), fields(user_email = %request.user.email))]
    pub async fn create_user(&self, request: CreateUserRequest) -> UserResult<User> {
        let address = self.addresses.create(request.address).await?;
        let user = User::new(request.user, Some(address.id));

        match self.users.create(user).await {
            Ok(user) => Ok(user),
            Err(e) => {
                match self.addresses.delete_by_id(address.id).await {
                    Ok(_) => tracing::warn!(
                        address_id = %address.id,
                        "User insert failed, removed its address"
                    ),
                    Err(cleanup) => tracing::error!(
                        address_id = %address.id,
                        error = %cleanup,
                        "User insert failed and the orphaned address could not be removed"
                    ),
                }
                Err(e)
            }
        }
    }

    /// Patch the user, then the address it references
    ///
    /// A user without an address reference is rejected before anything is
    /// written.
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> UserResult<UserUpdateResponse> {
        let existing = self
            .users
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let address_id = existing.address.ok_or(UserError::MissingAddress(id))?;

        let user_response = self
            .users
            .update(id, request.user)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let address_response = self
            .addresses
            .update_by_id(address_id, request.address)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %id, %address_id, "User references a missing address");
                UserError::AddressNotFound(address_id)
            })?;

        Ok(UserUpdateResponse {
            user_response,
            address_response,
        })
    }

    /// Delete the user, then the address it referenced
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<UserDeleteResponse> {
        let user_response = self
            .users
            .delete(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let address_response = match user_response.address {
            Some(address_id) => {
                let deleted = self.addresses.delete_by_id(address_id).await?;
                if deleted.is_none() {
                    tracing::warn!(user_id = %id, %address_id, "Deleted user referenced a missing address");
                }
                deleted
            }
            None => None,
        };

        Ok(UserDeleteResponse {
            user_response,
            address_response,
        })
    }
}

impl<U: UserRepository, A: AddressRepository> Clone for UserService<U, A> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            addresses: Arc::clone(&self.addresses),
        }
    }
}
