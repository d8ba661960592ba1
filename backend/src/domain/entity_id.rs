//! Opaque resource identifiers.
//!
//! Identifiers are twelve bytes assigned by the document store and exchanged
//! with clients as 24 lowercase hexadecimal characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of raw bytes in an identifier.
pub const ENTITY_ID_LEN: usize = 12;

/// Parse failures for the external identifier form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    /// The input was not exactly 24 characters long.
    #[error("identifier must be {expected} hexadecimal characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    /// The input contained a non-hexadecimal character.
    #[error("identifier must contain only hexadecimal characters")]
    InvalidCharacter,
}

/// Store-assigned identifier shared by users and posts.
///
/// # Examples
/// ```
/// use backend::domain::EntityId;
///
/// let id: EntityId = "66db2c856699531daa9abc16".parse().expect("valid id");
/// assert_eq!(id.to_string(), "66db2c856699531daa9abc16");
/// assert!("not-an-id".parse::<EntityId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId([u8; ENTITY_ID_LEN]);

/// Identifier of a user document.
pub type UserId = EntityId;
/// Identifier of a post document.
pub type PostId = EntityId;

impl EntityId {
    /// Wrap raw bytes produced by a store.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ENTITY_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes for store adapters.
    #[must_use]
    pub const fn bytes(&self) -> [u8; ENTITY_ID_LEN] {
        self.0
    }

    /// Parse the 24-character external form.
    ///
    /// # Errors
    /// Returns [`EntityIdError`] when the input has the wrong length or
    /// contains non-hex characters.
    pub fn parse(value: &str) -> Result<Self, EntityIdError> {
        let expected = ENTITY_ID_LEN * 2;
        if value.len() != expected {
            return Err(EntityIdError::InvalidLength {
                expected,
                actual: value.len(),
            });
        }
        let mut bytes = [0_u8; ENTITY_ID_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| EntityIdError::InvalidCharacter)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
