//! In-memory `PostRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, PostRepositoryError, WriteOutcome};
use crate::domain::{NewPost, Post, PostChanges, PostId, UserId};

use super::IdGenerator;

/// Posts held in insertion order.
pub struct InMemoryPostRepository {
    ids: IdGenerator,
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    /// Empty repository drawing identifiers from `ids`.
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            ids,
            posts: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Post>> {
        match self.posts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new(IdGenerator::new())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, PostRepositoryError> {
        let post = Post::from_new(self.ids.next_id(), post);
        self.lock().push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        Ok(self.lock().iter().find(|post| post.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(self.lock().clone())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(self
            .lock()
            .iter()
            .filter(|post| post.author == *author)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<WriteOutcome, PostRepositoryError> {
        let mut posts = self.lock();
        Ok(match posts.iter_mut().find(|post| post.id == *id) {
            Some(post) => {
                post.apply(changes);
                WriteOutcome::Matched
            }
            None => WriteOutcome::NoMatch,
        })
    }

    async fn delete(&self, id: &PostId) -> Result<WriteOutcome, PostRepositoryError> {
        let mut posts = self.lock();
        let before = posts.len();
        posts.retain(|post| post.id != *id);
        Ok(WriteOutcome::from_count((before - posts.len()) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_post(author: UserId) -> NewPost {
        let now = Utc::now();
        NewPost {
            content: "1234567890".to_owned(),
            author,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_by_author_filters() {
        let repo = InMemoryPostRepository::new(IdGenerator::with_seed(2));
        let ada = UserId::from_bytes([1; 12]);
        let bob = UserId::from_bytes([2; 12]);
        let first = repo.insert(new_post(ada)).await.expect("insert");
        repo.insert(new_post(bob)).await.expect("insert");

        let listed = repo.list_by_author(&ada).await.expect("list");
        assert_eq!(listed, vec![first]);
        assert_eq!(repo.list().await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn delete_twice_reports_no_match_second_time() {
        let repo = InMemoryPostRepository::default();
        let post = repo
            .insert(new_post(UserId::from_bytes([1; 12])))
            .await
            .expect("insert");
        assert_eq!(
            repo.delete(&post.id).await.expect("delete"),
            WriteOutcome::Matched
        );
        assert_eq!(
            repo.delete(&post.id).await.expect("delete"),
            WriteOutcome::NoMatch
        );
    }
}
