//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits for each infrastructure concern:
//!
//! - **persistence**: MongoDB-backed user and post repositories
//! - **security**: bcrypt credential hashing
//! - **notifications**: Firebase Cloud Messaging push delivery
//! - **memory**: in-memory repositories (feature `test-support`)
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod notifications;
pub mod persistence;
pub mod security;
