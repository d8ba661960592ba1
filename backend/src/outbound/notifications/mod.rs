//! Push-notification outbound adapters.
//!
//! This module provides a thin Firebase Cloud Messaging (HTTP v1)
//! implementation of the `NotificationDispatcher` port.

mod credentials;
mod dto;
mod fcm_dispatcher;

pub use credentials::ServiceAccountKey;
pub use fcm_dispatcher::FcmHttpDispatcher;
