//! Authentication primitives: login credentials, password hashes and token
//! claims.
//!
//! Keep inbound payload parsing outside the domain by exposing plain
//! constructors that handlers call once binding has succeeded.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::UserId;

/// Username and plaintext password presented at login or through the basic
/// gate.
///
/// No emptiness check is applied: blank values simply fail to match a stored
/// identity.
///
/// # Examples
/// ```
/// use logistic::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("alice", "s3cret");
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username used for the exact-match lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Salted one-way password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string produced by a [`crate::domain::ports::PasswordHasher`]
    /// or read back from the store.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Claim set carried by a bearer token.
///
/// The `id` key is used both when issuing and when reading a token back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub authorized: bool,
    pub id: i64,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Claims for a freshly authenticated user.
    pub fn authorized(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            authorized: true,
            id: user_id.get(),
            exp: expires_at.timestamp(),
        }
    }

    /// Identifier of the user the token was issued to.
    pub fn user_id(&self) -> Option<UserId> {
        UserId::new(self.id).ok()
    }

    /// Whether the token has expired at `now`; expiry is exclusive of leeway.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Signed token returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn as_str(&self) -> &str {
        self.token.as_str()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
