//! MongoDB implementations of UserRepository and AddressRepository

use async_trait::async_trait;
use database::mongodb::ids::{id_bson, id_filter};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{Address, CreateAddress, UpdateAddress, UpdateUser, User, UserWithAddress};
use crate::repository::{AddressRepository, UserRepository};

pub const USERS_COLLECTION: &str = "users";
pub const ADDRESSES_COLLECTION: &str = "addresses";

/// `$set` the fields present in `patch` and return the record after the
/// update. An empty patch reads the record unchanged.
async fn patch_by_id<T, P>(collection: &Collection<T>, id: Uuid, patch: &P) -> UserResult<Option<T>>
where
    T: Serialize + DeserializeOwned + Send + Sync,
    P: Serialize,
{
    let fields = bson::to_document(patch)?;

    if fields.is_empty() {
        return Ok(collection.find_one(id_filter(&id)).await?);
    }

    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let updated = collection
        .find_one_and_update(id_filter(&id), doc! { "$set": fields })
        .with_options(options)
        .await?;

    Ok(updated)
}

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<User>(USERS_COLLECTION);
        Self { collection }
    }

    /// `$match` the user, then `$lookup` its address and unwrap the
    /// single-element result. A missing match leaves `address` unset.
    fn with_address_pipeline(id: Uuid) -> Vec<Document> {
        vec![
            doc! { "$match": { "_id": id_bson(&id) } },
            doc! {
                "$lookup": {
                    "from": ADDRESSES_COLLECTION,
                    "localField": "address",
                    "foreignField": "_id",
                    "as": "address",
                }
            },
            doc! { "$set": { "address": { "$arrayElemAt": ["$address", 0] } } },
        ]
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(id_filter(&id)).await?)
    }

    #[instrument(skip(self))]
    async fn get_with_address(&self, id: Uuid) -> UserResult<Option<UserWithAddress>> {
        let cursor = self
            .collection
            .aggregate(Self::with_address_pipeline(id))
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        match documents.into_iter().next() {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;
        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: Uuid, patch: UpdateUser) -> UserResult<Option<User>> {
        let updated = patch_by_id(&self.collection, id, &patch).await?;
        if updated.is_some() {
            tracing::info!(user_id = %id, "User updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<Option<User>> {
        let deleted = self.collection.find_one_and_delete(id_filter(&id)).await?;
        if deleted.is_some() {
            tracing::info!(user_id = %id, "User deleted successfully");
        }
        Ok(deleted)
    }
}

/// MongoDB implementation of the AddressRepository
pub struct MongoAddressRepository {
    collection: Collection<Address>,
}

impl MongoAddressRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Address>(ADDRESSES_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl AddressRepository for MongoAddressRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateAddress) -> UserResult<Address> {
        let address = Address::new(input);
        self.collection.insert_one(&address).await?;
        tracing::info!(address_id = %address.id, "Address created successfully");
        Ok(address)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<Address>> {
        Ok(self.collection.find_one(id_filter(&id)).await?)
    }

    #[instrument(skip(self, patch))]
    async fn update_by_id(&self, id: Uuid, patch: UpdateAddress) -> UserResult<Option<Address>> {
        let updated = patch_by_id(&self.collection, id, &patch).await?;
        if updated.is_some() {
            tracing::info!(address_id = %id, "Address updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> UserResult<Option<Address>> {
        let deleted = self.collection.find_one_and_delete(id_filter(&id)).await?;
        if deleted.is_some() {
            tracing::info!(address_id = %id, "Address deleted successfully");
        }
        Ok(deleted)
    }
}
