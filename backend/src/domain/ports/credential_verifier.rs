//! Driving port backing the basic-credential gate.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Resolve `credentials` to exactly one stored identity whose password
    /// hash verifies.
    ///
    /// Every failure, including lookup errors, is reported as
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn verify_credentials(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
