//! Port for one-way credential hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum PasswordHashError {
        /// The primitive rejected the input or its parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, irreversible password hashing.
///
/// Implementations are CPU-bound and synchronous; async callers should run
/// them on a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh salt.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;
}

/// Cheap deterministic hasher for tests.
///
/// The output is never equal to the input but is trivially reversible, so it
/// must not be wired into a running server.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[cfg(any(test, feature = "test-support"))]
impl FixturePasswordHasher {
    const PREFIX: &'static str = "$fixture$";
}

#[cfg(any(test, feature = "test-support"))]
impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let reversed: Vec<u8> = plaintext.bytes().rev().collect();
        Ok(PasswordHash::new(format!(
            "{}{}",
            Self::PREFIX,
            hex::encode(reversed)
        )))
    }
}
