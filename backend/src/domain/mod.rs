//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities shared by the HTTP and persistence
//! adapters, plus the services implementing the driving ports. Keep adapters
//! out of this module; they reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error payload with stable code.
//! - EntityId (alias to `entity_id::EntityId`) — 12-byte store identifier.
//! - User / Post — persisted aggregates and their change-sets.
//! - UserService / PostService — driving port implementations.

pub mod entity_id;
pub mod error;
pub mod password;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::entity_id::{ENTITY_ID_LEN, EntityId, EntityIdError, PostId, UserId};
pub use self::error::{Error, ErrorCode};
pub use self::password::PasswordHash;
pub use self::post::{CreatePostParams, NewPost, Post, PostChanges, UpdatePostParams};
pub use self::post_service::{NOTIFICATION_MARKER, NotificationOutcome, PostService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{CreateUserParams, NewUser, UpdateUserParams, User, UserChanges};
pub use self::user_service::UserService;
pub use self::validation::FieldErrors;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("user not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
