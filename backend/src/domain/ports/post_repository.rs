//! Port abstraction for post persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId, UserId};

use super::{WriteOutcome, define_port_error};

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// A stored document could not be mapped onto the domain model.
        Decode { message: String } => "post document could not be decoded: {message}",
    }
}

/// Document-store operations over the posts collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its assigned identifier.
    async fn insert(&self, post: NewPost) -> Result<Post, PostRepositoryError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Fetch every post. There is no pagination.
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Fetch every post whose author is `author`.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError>;

    /// Merge a change-set into the addressed post.
    async fn update(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<WriteOutcome, PostRepositoryError>;

    /// Delete the addressed post.
    async fn delete(&self, id: &PostId) -> Result<WriteOutcome, PostRepositoryError>;
}
