//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password, persist the user and return the stored record.
    ///
    /// A username that is already registered yields
    /// [`crate::domain::ErrorCode::Conflict`].
    async fn register(&self, user: NewUser) -> Result<User, Error>;
}
