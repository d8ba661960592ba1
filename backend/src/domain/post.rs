//! Post entity, creation parameters and sparse update change-sets.

use chrono::{DateTime, Utc};

use super::validation::{FieldErrors, MIN_CONTENT_LEN};
use super::{EntityIdError, PostId, UserId};

/// Persisted post.
///
/// ## Invariants
/// - `created_at` never changes after insertion.
/// - `author` is not checked against the user store; it may dangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Attach a store-assigned identifier to a new post.
    #[must_use]
    pub fn from_new(id: PostId, new_post: NewPost) -> Self {
        let NewPost {
            content,
            author,
            created_at,
            updated_at,
        } = new_post;
        Self {
            id,
            content,
            author,
            created_at,
            updated_at,
        }
    }

    /// Merge a change-set into this record.
    pub fn apply(&mut self, changes: &PostChanges) {
        if let Some(content) = &changes.content {
            content.clone_into(&mut self.content);
        }
        self.updated_at = changes.updated_at;
    }
}

/// Post ready to be inserted; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub content: String,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Parse the author identifier and stamp both timestamps with `now`.
    ///
    /// # Errors
    /// Returns [`EntityIdError`] when `author` is not a 24-character hex
    /// identifier.
    pub fn from_params(params: CreatePostParams, now: DateTime<Utc>) -> Result<Self, EntityIdError> {
        let author = UserId::parse(&params.author)?;
        Ok(Self {
            content: params.content,
            author,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Payload for creating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePostParams {
    pub content: String,
    pub author: String,
}

impl CreatePostParams {
    /// Check the content length rule.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_min_len("content", &self.content, MIN_CONTENT_LEN);
        errors
    }
}

/// Payload for a sparse post update. Length rules are not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePostParams {
    pub content: Option<String>,
}

/// Fields to overwrite on an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub content: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl PostChanges {
    /// Keep non-empty content and always stamp `updated_at` with `now`.
    #[must_use]
    pub fn from_params(params: UpdatePostParams, now: DateTime<Utc>) -> Self {
        Self {
            content: params.content.filter(|content| !content.is_empty()),
            updated_at: now,
        }
    }
}
