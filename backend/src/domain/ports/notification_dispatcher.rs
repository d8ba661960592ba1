//! Driven port for push-notification delivery.
//!
//! Post creation fans a placeholder message out to the author's friends'
//! devices through this port. Delivery is best effort: adapters report
//! failures once and never retry.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification adapters.
    pub enum NotificationDispatchError {
        /// Credentials could not be loaded or exchanged for an access token.
        Credentials { message: String } => "notification credentials rejected: {message}",
        /// The push service could not be reached.
        Transport { message: String } => "notification transport failed: {message}",
        /// The push service refused the whole request.
        Rejected { status: u16, message: String } =>
            "notification request rejected with status {status}: {message}",
    }
}

/// One payload addressed to many device tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticastMessage {
    pub tokens: Vec<String>,
    pub data: BTreeMap<String, String>,
}

impl MulticastMessage {
    /// Data-only message whose single key and value are both `marker`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ports::MulticastMessage;
    ///
    /// let message = MulticastMessage::placeholder(vec!["token".into()], "sa");
    /// assert_eq!(message.data.get("sa").map(String::as_str), Some("sa"));
    /// ```
    #[must_use]
    pub fn placeholder(tokens: Vec<String>, marker: &str) -> Self {
        Self {
            tokens,
            data: BTreeMap::from([(marker.to_owned(), marker.to_owned())]),
        }
    }
}

/// Per-token delivery tally for one multicast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MulticastReport {
    pub success_count: usize,
    pub failure_count: usize,
}

/// Sends one message to a set of device tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver `message` to every token it carries.
    ///
    /// Per-token failures are counted in the report; an `Err` means the
    /// multicast as a whole could not be attempted.
    async fn send_multicast(
        &self,
        message: &MulticastMessage,
    ) -> Result<MulticastReport, NotificationDispatchError>;
}

/// Dispatcher used when push credentials are not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for NoOpNotificationDispatcher {
    async fn send_multicast(
        &self,
        message: &MulticastMessage,
    ) -> Result<MulticastReport, NotificationDispatchError> {
        debug!(
            tokens = message.tokens.len(),
            "push notifications disabled; multicast dropped"
        );
        Ok(MulticastReport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_op_dispatcher_reports_nothing_sent() {
        let message = MulticastMessage::placeholder(vec!["a".into(), "b".into()], "sa");
        let report = NoOpNotificationDispatcher
            .send_multicast(&message)
            .await
            .expect("no-op dispatch");
        assert_eq!(report, MulticastReport::default());
    }

    #[test]
    fn rejected_error_formats_status() {
        let err = NotificationDispatchError::rejected(401_u16, "bad token");
        assert_eq!(
            err.to_string(),
            "notification request rejected with status 401: bad token"
        );
    }
}
