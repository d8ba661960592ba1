//! Driving port for post reads.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId, UserId};

/// Domain use-case port for fetching posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Fetch one post; `NotFound` when absent.
    async fn get_post(&self, id: &PostId) -> Result<Post, Error>;

    /// Fetch every post.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// Fetch every post written by `author`.
    async fn list_posts_by_author(&self, author: &UserId) -> Result<Vec<Post>, Error>;
}
