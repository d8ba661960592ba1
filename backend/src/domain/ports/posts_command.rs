//! Driving port for post mutations.

use async_trait::async_trait;

use crate::domain::{CreatePostParams, Error, Post, PostId, UpdatePostParams};

/// Domain use-case port for post mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Validate and persist a post, then notify the author's friends.
    async fn create_post(&self, params: CreatePostParams) -> Result<Post, Error>;

    /// Apply a sparse update and refresh `updated_at`.
    async fn update_post(&self, id: &PostId, params: UpdatePostParams) -> Result<(), Error>;

    /// Delete a post. Deleting an unknown identifier succeeds.
    async fn delete_post(&self, id: &PostId) -> Result<(), Error>;
}
