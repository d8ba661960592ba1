//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`] and a
//! [`PasswordHasher`]. Hashing is CPU-bound, so it runs on a blocking thread
//! with the caller's trace identifier carried across.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError, UsersCommand,
    UsersQuery, WriteOutcome,
};
use crate::domain::{
    CreateUserParams, Error, NewUser, TraceId, UpdateUserParams, User, UserChanges, UserId,
};

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository and hasher.
    pub fn new(repo: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub(crate) fn map_repository_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::Decode { message } => {
                Error::internal(format!("user document malformed: {message}"))
            }
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    fn user_not_found(id: &UserId) -> Error {
        Error::not_found(format!("user {id} not found"))
            .with_details(serde_json::json!({ "id": id.to_string() }))
    }

    /// Run `work` against the hasher on the blocking pool.
    async fn with_hasher<T, F>(&self, work: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PasswordHasher) -> Result<T, PasswordHashError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let trace_id = TraceId::current();
        let joined = tokio::task::spawn_blocking(move || match trace_id {
            Some(id) => TraceId::sync_scope(id, || work(hasher.as_ref())),
            None => work(hasher.as_ref()),
        })
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?;
        joined.map_err(Self::map_hash_error)
    }

    async fn ensure_exists(&self, id: &UserId) -> Result<(), Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .map(|_| ())
            .ok_or_else(|| Self::user_not_found(id))
    }

    fn require_match(outcome: WriteOutcome, id: &UserId) -> Result<(), Error> {
        if outcome.is_matched() {
            Ok(())
        } else {
            Err(Self::user_not_found(id))
        }
    }

    fn reject_self_friendship(subject: &UserId, friend: &UserId) -> Result<(), Error> {
        if subject == friend {
            return Err(Error::invalid_request("a user cannot befriend themselves")
                .with_details(serde_json::json!({ "userID": friend.to_string() })));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, params: CreateUserParams) -> Result<User, Error> {
        let errors = params.validate();
        if !errors.is_empty() {
            return Err(Error::validation_failed("user validation failed")
                .with_details(errors.to_json()));
        }

        let new_user = self
            .with_hasher(move |hasher| NewUser::from_params(params, hasher))
            .await?;
        let user = self
            .repo
            .insert(new_user)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, params: UpdateUserParams) -> Result<(), Error> {
        let changes = self
            .with_hasher(move |hasher| UserChanges::from_params(params, hasher))
            .await?;
        if changes.is_empty() {
            return self.ensure_exists(id).await;
        }

        let outcome = self
            .repo
            .update(id, &changes)
            .await
            .map_err(Self::map_repository_error)?;
        Self::require_match(outcome, id)?;
        info!(user_id = %id, "user updated");
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let outcome = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        match outcome {
            WriteOutcome::Matched => info!(user_id = %id, "user deleted"),
            WriteOutcome::NoMatch => debug!(user_id = %id, "delete matched no user"),
        }
        Ok(())
    }

    async fn add_friend(&self, subject: &UserId, friend: &UserId) -> Result<(), Error> {
        Self::reject_self_friendship(subject, friend)?;
        let outcome = self
            .repo
            .add_friend(subject, friend)
            .await
            .map_err(Self::map_repository_error)?;
        Self::require_match(outcome, subject)?;
        info!(user_id = %subject, friend_id = %friend, "friend added");
        Ok(())
    }

    async fn remove_friend(&self, subject: &UserId, friend: &UserId) -> Result<(), Error> {
        let outcome = self
            .repo
            .remove_friend(subject, friend)
            .await
            .map_err(Self::map_repository_error)?;
        Self::require_match(outcome, subject)?;
        info!(user_id = %subject, friend_id = %friend, "friend removed");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::user_not_found(id))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repo.list().await.map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
