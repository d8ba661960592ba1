//! Driving port for user mutations.
//!
//! Inbound adapters call this port to create, update and delete users and to
//! edit friend sets without importing persistence or hashing concerns.

use async_trait::async_trait;

use crate::domain::{CreateUserParams, Error, UpdateUserParams, User, UserId};

/// Domain use-case port for user mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate, hash and persist a new user.
    async fn create_user(&self, params: CreateUserParams) -> Result<User, Error>;

    /// Apply a sparse update to an existing user.
    async fn update_user(&self, id: &UserId, params: UpdateUserParams) -> Result<(), Error>;

    /// Delete a user. Deleting an unknown identifier succeeds.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;

    /// Add a directed friend edge `subject -> friend`.
    async fn add_friend(&self, subject: &UserId, friend: &UserId) -> Result<(), Error>;

    /// Remove the directed friend edge `subject -> friend` if present.
    async fn remove_friend(&self, subject: &UserId, friend: &UserId) -> Result<(), Error>;
}
