//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUserRecord, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored record with its assigned id.
    async fn create(&self, user: &NewUserRecord) -> Result<User, UserPersistenceError>;

    /// Fetch the user whose username matches exactly.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;
}
