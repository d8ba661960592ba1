//! Test utilities for the backend crate.
//!
//! Wires the domain services to the in-memory repositories so unit tests in
//! `src/` and integration suites in `tests/` can drive the real HTTP handlers
//! without MongoDB or FCM.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    FixturePasswordHasher, MulticastMessage, MulticastReport, NotificationDispatchError,
    NotificationDispatcher,
};
use crate::domain::{PostService, UserService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{IdGenerator, InMemoryPostRepository, InMemoryUserRepository};

/// Dispatcher that keeps every multicast it receives and reports each token
/// as delivered.
#[derive(Debug, Default)]
pub struct RecordingNotificationDispatcher {
    sent: Mutex<Vec<MulticastMessage>>,
}

impl RecordingNotificationDispatcher {
    fn lock(&self) -> MutexGuard<'_, Vec<MulticastMessage>> {
        match self.sent.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<MulticastMessage> {
        self.lock().clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotificationDispatcher {
    async fn send_multicast(
        &self,
        message: &MulticastMessage,
    ) -> Result<MulticastReport, NotificationDispatchError> {
        self.lock().push(message.clone());
        Ok(MulticastReport {
            success_count: message.tokens.len(),
            failure_count: 0,
        })
    }
}

/// In-memory backend: repositories, dispatcher and the services over them.
#[derive(Clone)]
pub struct InMemoryBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub dispatcher: Arc<RecordingNotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl InMemoryBackend {
    /// Fresh backend with deterministic identifiers.
    ///
    /// # Examples
    /// ```
    /// use backend::test_support::InMemoryBackend;
    ///
    /// let backend = InMemoryBackend::new();
    /// let _state = backend.http_state();
    /// assert!(backend.dispatcher.messages().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let ids = IdGenerator::with_seed(7);
        Self {
            users: Arc::new(InMemoryUserRepository::new(ids.clone())),
            posts: Arc::new(InMemoryPostRepository::new(ids)),
            dispatcher: Arc::new(RecordingNotificationDispatcher::default()),
            clock,
        }
    }

    /// HTTP state backed by this backend's repositories.
    pub fn http_state(&self) -> HttpState {
        let users = Arc::new(UserService::new(
            self.users.clone(),
            Arc::new(FixturePasswordHasher),
        ));
        let posts = Arc::new(PostService::new(
            self.posts.clone(),
            self.users.clone(),
            self.dispatcher.clone(),
            self.clock.clone(),
        ));
        HttpState::new(users.clone(), users, posts.clone(), posts)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}
