//! MongoDB client and database handle shared by the repositories.
//!
//! The driver keeps its own connection pool inside [`Client`], so the store is
//! cheap to clone and one instance serves every repository.

use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use super::documents::{PostDocument, UserDocument};

const USERS_COLLECTION: &str = "users";
const POSTS_COLLECTION: &str = "posts";
const APP_NAME: &str = "note-backend";

/// Errors that can occur while establishing the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or the client built.
    #[error("failed to configure MongoDB client: {message}")]
    Configure { message: String },

    /// The server did not answer a ping.
    #[error("MongoDB ping failed: {message}")]
    Ping { message: String },
}

impl StoreError {
    /// Create a configuration error with the given message.
    pub fn configure(message: impl Into<String>) -> Self {
        Self::Configure {
            message: message.into(),
        }
    }

    /// Create a ping error with the given message.
    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }
}

/// Handle to one MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Build a client for `url` and select `database_name`.
    ///
    /// The driver connects lazily; call [`MongoStore::ping`] to verify the
    /// server is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configure`] when the URL is invalid.
    pub async fn connect(url: &str, database_name: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|err| StoreError::configure(err.to_string()))?;
        options.app_name = Some(APP_NAME.to_owned());
        let client =
            Client::with_options(options).map_err(|err| StoreError::configure(err.to_string()))?;
        Ok(Self {
            database: client.database(database_name),
        })
    }

    /// Round-trip a `ping` command to the server.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Ping`] when the server cannot be reached.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| StoreError::ping(err.to_string()))
    }

    pub(super) fn users(&self) -> Collection<UserDocument> {
        self.database.collection(USERS_COLLECTION)
    }

    pub(super) fn posts(&self) -> Collection<PostDocument> {
        self.database.collection(POSTS_COLLECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_malformed_connection_string() {
        let err = MongoStore::connect("not-a-mongo-url", "note_app")
            .await
            .expect_err("invalid scheme");
        assert!(matches!(err, StoreError::Configure { .. }));
    }

    #[tokio::test]
    async fn selects_named_collections() {
        let store = MongoStore::connect("mongodb://localhost:27017", "note_app")
            .await
            .expect("client builds without a live server");
        assert_eq!(store.users().name(), USERS_COLLECTION);
        assert_eq!(store.posts().name(), POSTS_COLLECTION);
        assert_eq!(store.users().namespace().db, "note_app");
    }
}
