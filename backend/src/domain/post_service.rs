//! Post domain service.
//!
//! Implements the post driving ports. Creating a post also fans a placeholder
//! push notification out to the author's friends. That step is best effort:
//! once the post is stored the request succeeds, and whatever happened during
//! the fan-out is reported as a [`NotificationOutcome`] and logged.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    MulticastMessage, MulticastReport, NotificationDispatcher, PostRepository,
    PostRepositoryError, PostsCommand, PostsQuery, UserRepository, UserRepositoryError,
    WriteOutcome,
};
use crate::domain::{
    CreatePostParams, Error, NewPost, Post, PostChanges, PostId, UpdatePostParams, UserId,
};

/// Key and value of the data-only payload sent when a post is created.
pub const NOTIFICATION_MARKER: &str = "sa";

/// What the notification step did after a post was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The multicast was handed to the push service.
    Sent {
        recipients: usize,
        report: MulticastReport,
    },
    /// The author has no friend with a registered device token.
    NoRecipients,
    /// The author record does not exist.
    AuthorMissing,
    /// Resolving the author or a friend failed; nothing was sent.
    LookupFailed { message: String },
    /// The push service could not be used.
    DispatchFailed { message: String },
}

impl NotificationOutcome {
    fn log(&self, post_id: &PostId, author: &UserId) {
        match self {
            Self::Sent { recipients, report } => info!(
                post_id = %post_id,
                author = %author,
                recipients,
                success_count = report.success_count,
                failure_count = report.failure_count,
                "post notification sent"
            ),
            Self::NoRecipients => {
                debug!(post_id = %post_id, author = %author, "post notification had no recipients");
            }
            Self::AuthorMissing => {
                debug!(post_id = %post_id, author = %author, "post author not found; notification skipped");
            }
            Self::LookupFailed { message } => warn!(
                post_id = %post_id,
                author = %author,
                error = %message,
                "post notification aborted while resolving friends"
            ),
            Self::DispatchFailed { message } => warn!(
                post_id = %post_id,
                author = %author,
                error = %message,
                "post notification dispatch failed"
            ),
        }
    }
}

/// Post service implementing [`PostsCommand`] and [`PostsQuery`].
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PostService<P, U> {
    /// Create a new post service.
    pub fn new(
        posts: Arc<P>,
        users: Arc<U>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            users,
            dispatcher,
            clock,
        }
    }
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    fn map_repository_error(error: PostRepositoryError) -> Error {
        match error {
            PostRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("post repository unavailable: {message}"))
            }
            PostRepositoryError::Query { message } => {
                Error::internal(format!("post repository error: {message}"))
            }
            PostRepositoryError::Decode { message } => {
                Error::internal(format!("post document malformed: {message}"))
            }
        }
    }

    fn post_not_found(id: &PostId) -> Error {
        Error::not_found(format!("post {id} not found")).with_details(json!({ "id": id.to_string() }))
    }

    async fn recipient_tokens(&self, friends: &[UserId]) -> Result<Vec<String>, UserRepositoryError> {
        let mut tokens = Vec::with_capacity(friends.len());
        for friend_id in friends {
            match self.users.find_by_id(friend_id).await? {
                Some(friend) if !friend.fcm_token.is_empty() => tokens.push(friend.fcm_token),
                Some(_) => {}
                None => debug!(friend_id = %friend_id, "friend not found; skipped"),
            }
        }
        Ok(tokens)
    }

    /// Send the placeholder notification to every friend of `author` that
    /// has a device token.
    pub async fn notify_friends(&self, author: &UserId) -> NotificationOutcome {
        let author_record = match self.users.find_by_id(author).await {
            Ok(Some(user)) => user,
            Ok(None) => return NotificationOutcome::AuthorMissing,
            Err(err) => {
                return NotificationOutcome::LookupFailed {
                    message: err.to_string(),
                };
            }
        };

        let tokens = match self.recipient_tokens(&author_record.friends).await {
            Ok(tokens) => tokens,
            Err(err) => {
                return NotificationOutcome::LookupFailed {
                    message: err.to_string(),
                };
            }
        };
        if tokens.is_empty() {
            return NotificationOutcome::NoRecipients;
        }

        let message = MulticastMessage::placeholder(tokens, NOTIFICATION_MARKER);
        match self.dispatcher.send_multicast(&message).await {
            Ok(report) => NotificationOutcome::Sent {
                recipients: message.tokens.len(),
                report,
            },
            Err(err) => NotificationOutcome::DispatchFailed {
                message: err.to_string(),
            },
        }
    }
}

#[async_trait]
impl<P, U> PostsCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, params: CreatePostParams) -> Result<Post, Error> {
        let errors = params.validate();
        if !errors.is_empty() {
            return Err(Error::validation_failed("post validation failed")
                .with_details(errors.to_json()));
        }

        let author = params.author.clone();
        let new_post = NewPost::from_params(params, self.clock.utc()).map_err(|err| {
            Error::invalid_request(format!("author is not a valid identifier: {err}"))
                .with_details(json!({ "field": "author", "value": author }))
        })?;
        let post = self
            .posts
            .insert(new_post)
            .await
            .map_err(Self::map_repository_error)?;
        info!(post_id = %post.id, author = %post.author, "post created");

        self.notify_friends(&post.author)
            .await
            .log(&post.id, &post.author);
        Ok(post)
    }

    async fn update_post(&self, id: &PostId, params: UpdatePostParams) -> Result<(), Error> {
        let changes = PostChanges::from_params(params, self.clock.utc());
        let outcome = self
            .posts
            .update(id, &changes)
            .await
            .map_err(Self::map_repository_error)?;
        match outcome {
            WriteOutcome::Matched => {
                info!(post_id = %id, "post updated");
                Ok(())
            }
            WriteOutcome::NoMatch => Err(Self::post_not_found(id)),
        }
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), Error> {
        let outcome = self
            .posts
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        match outcome {
            WriteOutcome::Matched => info!(post_id = %id, "post deleted"),
            WriteOutcome::NoMatch => debug!(post_id = %id, "delete matched no post"),
        }
        Ok(())
    }
}

#[async_trait]
impl<P, U> PostsQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn get_post(&self, id: &PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::post_not_found(id))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.posts.list().await.map_err(Self::map_repository_error)
    }

    async fn list_posts_by_author(&self, author: &UserId) -> Result<Vec<Post>, Error> {
        self.posts
            .list_by_author(author)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
