//! User identity model.
//!
//! A [`User`] is created by registration and read back by login and the
//! basic-credential gate. The stored password hash never leaves the domain:
//! HTTP adapters project users into their own response types.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::auth::PasswordHash;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Store-assigned identifiers start at one.
    #[error("user id must be positive, got {0}")]
    NonPositiveId(i64),
}

/// Store-assigned user identifier.
///
/// # Examples
/// ```
/// use logistic::domain::UserId;
///
/// let id = UserId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId(id));
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `password_hash` is a salted PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    password_hash: PasswordHash,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from stored parts.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password_hash: PasswordHash,
        address: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash,
            address: address.into(),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Registration input carrying the plaintext password.
///
/// The password is wiped from memory on drop. No field-level validation is
/// applied beyond what binding already enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    password: Zeroizing<String>,
    address: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
            address: address.into(),
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn address(&self) -> &str {
        self.address.as_str()
    }
}

/// User row ready for insertion: the password has already been hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub username: String,
    pub password_hash: PasswordHash,
    pub address: String,
}
