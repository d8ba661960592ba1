//! Google service-account key loading.

use std::fmt;
use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::domain::ports::NotificationDispatchError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

/// Fields of a service-account JSON key needed to mint access tokens.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

fn read_file_to_string(path: &Path) -> io::Result<String> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read_to_string(Path::new(file_name))
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDispatchError::Credentials`] when the JSON is
    /// malformed or lacks a required field.
    pub fn from_json(raw: &str) -> Result<Self, NotificationDispatchError> {
        serde_json::from_str(raw).map_err(|err| {
            NotificationDispatchError::credentials(format!("invalid service account key: {err}"))
        })
    }

    /// Read and parse a key file.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDispatchError::Credentials`] when the file cannot
    /// be read or parsed.
    pub fn load(path: &Path) -> Result<Self, NotificationDispatchError> {
        let raw = read_file_to_string(path).map_err(|err| {
            NotificationDispatchError::credentials(format!(
                "failed to read {}: {err}",
                path.display()
            ))
        })?;
        Self::from_json(&raw)
    }
}
