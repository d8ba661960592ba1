//! MongoDB persistence adapters.
//!
//! This module provides concrete implementations of the repository ports
//! backed by MongoDB through the official async driver.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between BSON documents and
//!   domain types. No business logic resides here.
//! - **Internal documents**: the serde document structs in `documents` are
//!   implementation details, never exposed to the domain layer.
//! - **Single-document writes**: every mutation addresses one document by
//!   `_id`, so each call is atomic on its own.
//! - **Strongly typed errors**: driver errors are mapped onto the port error
//!   enums, with connectivity failures kept distinct from query failures.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{MongoStore, MongoUserRepository};
//!
//! let store = MongoStore::connect("mongodb://localhost:27017", "note_app").await?;
//! let repo = MongoUserRepository::new(&store);
//! ```

mod documents;
mod error_mapping;
mod mongo_post_repository;
mod mongo_user_repository;
mod store;

pub use mongo_post_repository::MongoPostRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::{MongoStore, StoreError};
