//! User entity, creation parameters and sparse update change-sets.

use super::ports::{PasswordHashError, PasswordHasher};
use super::validation::{
    FieldErrors, MIN_FIRST_NAME_LEN, MIN_LAST_NAME_LEN, MIN_PASSWORD_LEN, is_email_valid,
};
use super::{PasswordHash, UserId};

/// Persisted user.
///
/// ## Invariants
/// - `password` holds a hash, never plaintext.
/// - `friends` holds each identifier at most once. Edges are directed: being
///   in someone's `friends` says nothing about their presence in yours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: PasswordHash,
    pub fcm_token: String,
    pub friends: Vec<UserId>,
}

impl User {
    /// Attach a store-assigned identifier to a new user.
    #[must_use]
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            first_name,
            last_name,
            email,
            password,
            fcm_token,
            friends,
        } = new_user;
        Self {
            id,
            first_name,
            last_name,
            email,
            password,
            fcm_token,
            friends,
        }
    }

    /// Add `friend` with set semantics. Returns `false` when already present.
    pub fn add_friend(&mut self, friend: UserId) -> bool {
        if self.friends.contains(&friend) {
            return false;
        }
        self.friends.push(friend);
        true
    }

    /// Remove `friend` if present. Returns `false` when it was absent.
    pub fn remove_friend(&mut self, friend: &UserId) -> bool {
        let before = self.friends.len();
        self.friends.retain(|existing| existing != friend);
        self.friends.len() != before
    }

    /// Merge a sparse change-set into this record.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(first_name) = &changes.first_name {
            first_name.clone_into(&mut self.first_name);
        }
        if let Some(last_name) = &changes.last_name {
            last_name.clone_into(&mut self.last_name);
        }
        if let Some(fcm_token) = &changes.fcm_token {
            fcm_token.clone_into(&mut self.fcm_token);
        }
        if let Some(password) = &changes.password {
            self.password = password.clone();
        }
    }
}

/// User ready to be inserted; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: PasswordHash,
    pub fcm_token: String,
    pub friends: Vec<UserId>,
}

impl NewUser {
    /// Hash the password and start with an empty friend set.
    ///
    /// # Errors
    /// Propagates [`PasswordHashError`] when hashing fails.
    pub fn from_params(
        params: CreateUserParams,
        hasher: &dyn PasswordHasher,
    ) -> Result<Self, PasswordHashError> {
        let password = hasher.hash(&params.password)?;
        Ok(Self {
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            password,
            fcm_token: params.fcm_token,
            friends: Vec::new(),
        })
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserParams {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub fcm_token: String,
    pub password: String,
}

impl CreateUserParams {
    /// Check name, password and email rules, accumulating every violation.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CreateUserParams;
    ///
    /// let params = CreateUserParams {
    ///     first_name: "J".into(),
    ///     email: "a@b.com".into(),
    ///     ..CreateUserParams::default()
    /// };
    /// let errors = params.validate();
    /// assert!(errors.get("firstName").is_some());
    /// assert!(errors.get("email").is_none());
    /// ```
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_min_len("firstName", &self.first_name, MIN_FIRST_NAME_LEN);
        errors.require_min_len("lastName", &self.last_name, MIN_LAST_NAME_LEN);
        errors.require_min_len("password", &self.password, MIN_PASSWORD_LEN);
        if !is_email_valid(&self.email) {
            errors.insert("email", format!("email {} is invalid", self.email));
        }
        errors
    }
}

/// Payload for a sparse user update. `None` and `Some("")` both mean
/// "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub fcm_token: Option<String>,
    pub password: Option<String>,
}

/// Fields to overwrite on an existing user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub fcm_token: Option<String>,
    pub password: Option<PasswordHash>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.is_empty())
}

impl UserChanges {
    /// Keep only non-empty fields, re-hashing a supplied password.
    ///
    /// # Errors
    /// Propagates [`PasswordHashError`] when hashing the new password fails.
    pub fn from_params(
        params: UpdateUserParams,
        hasher: &dyn PasswordHasher,
    ) -> Result<Self, PasswordHashError> {
        let password = non_empty(params.password)
            .map(|plaintext| hasher.hash(&plaintext))
            .transpose()?;
        Ok(Self {
            first_name: non_empty(params.first_name),
            last_name: non_empty(params.last_name),
            fcm_token: non_empty(params.fcm_token),
            password,
        })
    }

    /// True when the update would not modify any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.fcm_token.is_none()
            && self.password.is_none()
    }
}
