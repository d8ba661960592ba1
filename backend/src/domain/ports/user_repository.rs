//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId};

use super::{WriteOutcome, define_port_error};

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A stored document could not be mapped onto the domain model.
        Decode { message: String } => "user document could not be decoded: {message}",
    }
}

/// Document-store operations over the users collection.
///
/// Every method touches a single document, so each call is atomic on its own
/// and no multi-document invariant is maintained.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its assigned identifier.
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch every user. There is no pagination.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Merge a sparse change-set into the addressed user.
    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<WriteOutcome, UserRepositoryError>;

    /// Delete the addressed user. Posts and other users' friend sets are left
    /// untouched.
    async fn delete(&self, id: &UserId) -> Result<WriteOutcome, UserRepositoryError>;

    /// Add `friend` to the subject's friend set if not already present.
    async fn add_friend(
        &self,
        subject: &UserId,
        friend: &UserId,
    ) -> Result<WriteOutcome, UserRepositoryError>;

    /// Remove `friend` from the subject's friend set if present.
    async fn remove_friend(
        &self,
        subject: &UserId,
        friend: &UserId,
    ) -> Result<WriteOutcome, UserRepositoryError>;
}
