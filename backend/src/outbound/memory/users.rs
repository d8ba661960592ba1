//! In-memory `UserRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError, WriteOutcome};
use crate::domain::{NewUser, User, UserChanges, UserId};

use super::IdGenerator;

/// Users held in insertion order.
pub struct InMemoryUserRepository {
    ids: IdGenerator,
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Empty repository drawing identifiers from `ids`.
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            ids,
            users: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        match self.users.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn with_user<F>(&self, id: &UserId, mutate: F) -> WriteOutcome
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.lock();
        match users.iter_mut().find(|user| user.id == *id) {
            Some(user) => {
                mutate(user);
                WriteOutcome::Matched
            }
            None => WriteOutcome::NoMatch,
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(IdGenerator::new())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let user = User::from_new(self.ids.next_id(), user);
        self.lock().push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().iter().find(|user| user.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.lock().clone())
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<WriteOutcome, UserRepositoryError> {
        Ok(self.with_user(id, |user| user.apply(changes)))
    }

    async fn delete(&self, id: &UserId) -> Result<WriteOutcome, UserRepositoryError> {
        let mut users = self.lock();
        let before = users.len();
        users.retain(|user| user.id != *id);
        Ok(WriteOutcome::from_count((before - users.len()) as u64))
    }

    async fn add_friend(
        &self,
        subject: &UserId,
        friend: &UserId,
    ) -> Result<WriteOutcome, UserRepositoryError> {
        Ok(self.with_user(subject, |user| {
            user.add_friend(*friend);
        }))
    }

    async fn remove_friend(
        &self,
        subject: &UserId,
        friend: &UserId,
    ) -> Result<WriteOutcome, UserRepositoryError> {
        Ok(self.with_user(subject, |user| {
            user.remove_friend(friend);
        }))
    }
}
