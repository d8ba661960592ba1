//! MongoDB-backed `UserRepository` adapter.

use async_trait::async_trait;
use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::Collection;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError, WriteOutcome};
use crate::domain::{NewUser, User, UserChanges, UserId};

use super::documents::{UserDocument, object_id};
use super::error_mapping::map_user_error;
use super::store::MongoStore;

/// Users collection adapter.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Create a repository over the store's `users` collection.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.users(),
        }
    }
}

fn by_id(id: &UserId) -> Document {
    doc! { "_id": object_id(id) }
}

/// `$set` body holding only the fields present in `changes`.
fn set_document(changes: &UserChanges) -> Document {
    let mut set = Document::new();
    if let Some(first_name) = &changes.first_name {
        set.insert("firstName", first_name.as_str());
    }
    if let Some(last_name) = &changes.last_name {
        set.insert("lastName", last_name.as_str());
    }
    if let Some(fcm_token) = &changes.fcm_token {
        set.insert("fcmToken", fcm_token.as_str());
    }
    if let Some(password) = &changes.password {
        set.insert("password", password.as_str());
    }
    set
}

/// Pipeline stage turning a stored `friends: null` into an empty array so the
/// following stage always sees a list.
fn normalise_friends() -> Document {
    doc! { "$set": { "friends": { "$ifNull": ["$friends", []] } } }
}

/// Set-add `friend` to the subject's list, tolerating a null list.
fn add_friend_pipeline(friend: &UserId) -> Vec<Document> {
    let friend = object_id(friend);
    vec![
        normalise_friends(),
        doc! { "$set": { "friends": { "$cond": [
            { "$in": [friend, "$friends"] },
            "$friends",
            { "$concatArrays": ["$friends", [friend]] }
        ] } } },
    ]
}

/// Remove every occurrence of `friend`, tolerating a null list.
fn remove_friend_pipeline(friend: &UserId) -> Vec<Document> {
    vec![
        normalise_friends(),
        doc! { "$set": { "friends": { "$filter": {
            "input": "$friends",
            "cond": { "$ne": ["$$this", object_id(friend)] }
        } } } },
    ]
}

fn decode(document: UserDocument) -> Result<User, UserRepositoryError> {
    document.into_domain().map_err(UserRepositoryError::decode)
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut document = UserDocument::from(user);
        let inserted = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_user_error)?;
        let oid = inserted
            .inserted_id
            .as_object_id()
            .ok_or_else(|| UserRepositoryError::decode("inserted _id is not an ObjectId"))?;
        document.id = Some(oid);
        decode(document)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        self.collection
            .find_one(by_id(id))
            .await
            .map_err(map_user_error)?
            .map(decode)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let documents: Vec<UserDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_user_error)?
            .try_collect()
            .await
            .map_err(map_user_error)?;
        documents.into_iter().map(decode).collect()
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<WriteOutcome, UserRepositoryError> {
        let set = set_document(changes);
        if set.is_empty() {
            let exists = self.find_by_id(id).await?.is_some();
            return Ok(if exists {
                WriteOutcome::Matched
            } else {
                WriteOutcome::NoMatch
            });
        }
        let result = self
            .collection
            .update_one(by_id(id), doc! { "$set": set })
            .await
            .map_err(map_user_error)?;
        Ok(WriteOutcome::from_count(result.matched_count))
    }

    async fn delete(&self, id: &UserId) -> Result<WriteOutcome, UserRepositoryError> {
        let result = self
            .collection
            .delete_one(by_id(id))
            .await
            .map_err(map_user_error)?;
        debug!(user_id = %id, deleted = result.deleted_count, "users delete_one");
        Ok(WriteOutcome::from_count(result.deleted_count))
    }

    async fn add_friend(
        &self,
        subject: &UserId,
        friend: &UserId,
    ) -> Result<WriteOutcome, UserRepositoryError> {
        let result = self
            .collection
            .update_one(by_id(subject), add_friend_pipeline(friend))
            .await
            .map_err(map_user_error)?;
        Ok(WriteOutcome::from_count(result.matched_count))
    }

    async fn remove_friend(
        &self,
        subject: &UserId,
        friend: &UserId,
    ) -> Result<WriteOutcome, UserRepositoryError> {
        let result = self
            .collection
            .update_one(by_id(subject), remove_friend_pipeline(friend))
            .await
            .map_err(map_user_error)?;
        Ok(WriteOutcome::from_count(result.matched_count))
    }
}
