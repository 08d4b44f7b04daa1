//! Driven port for salted one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the plaintext failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        Malformed { message: String } => "stored password hash is malformed: {message}",
    }
}

/// CPU-bound hashing; async callers should move work off the reactor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Whether `password` matches `hash`.
    ///
    /// A mismatch is `Ok(false)`; only an unreadable hash is an error.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
