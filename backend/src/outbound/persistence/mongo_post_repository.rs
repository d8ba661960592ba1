//! MongoDB-backed `PostRepository` adapter.

use async_trait::async_trait;
use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::Collection;

use crate::domain::ports::{PostRepository, PostRepositoryError, WriteOutcome};
use crate::domain::{NewPost, Post, PostChanges, PostId, UserId};

use super::documents::{PostDocument, object_id};
use super::error_mapping::map_post_error;
use super::store::MongoStore;

/// Posts collection adapter.
#[derive(Clone, Debug)]
pub struct MongoPostRepository {
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    /// Create a repository over the store's `posts` collection.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.posts(),
        }
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Post>, PostRepositoryError> {
        let documents: Vec<PostDocument> = self
            .collection
            .find(filter)
            .await
            .map_err(map_post_error)?
            .try_collect()
            .await
            .map_err(map_post_error)?;
        documents.into_iter().map(decode).collect()
    }
}

fn decode(document: PostDocument) -> Result<Post, PostRepositoryError> {
    document.into_domain().map_err(PostRepositoryError::decode)
}

fn set_document(changes: &PostChanges) -> Document {
    let mut set = doc! { "updated_at": bson::DateTime::from_chrono(changes.updated_at) };
    if let Some(content) = &changes.content {
        set.insert("content", content.as_str());
    }
    set
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, PostRepositoryError> {
        let mut document = PostDocument::from(post);
        let inserted = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_post_error)?;
        let oid = inserted
            .inserted_id
            .as_object_id()
            .ok_or_else(|| PostRepositoryError::decode("inserted _id is not an ObjectId"))?;
        document.id = Some(oid);
        decode(document)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        self.collection
            .find_one(doc! { "_id": object_id(id) })
            .await
            .map_err(map_post_error)?
            .map(decode)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        self.find_many(doc! {}).await
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError> {
        self.find_many(doc! { "author": object_id(author) }).await
    }

    async fn update(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<WriteOutcome, PostRepositoryError> {
        let result = self
            .collection
            .update_one(doc! { "_id": object_id(id) }, doc! { "$set": set_document(changes) })
            .await
            .map_err(map_post_error)?;
        Ok(WriteOutcome::from_count(result.matched_count))
    }

    async fn delete(&self, id: &PostId) -> Result<WriteOutcome, PostRepositoryError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": object_id(id) })
            .await
            .map_err(map_post_error)?;
        Ok(WriteOutcome::from_count(result.deleted_count))
    }
}
