//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for fetching users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user; `NotFound` when absent.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;

    /// Fetch every user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
