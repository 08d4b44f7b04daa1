//! Driving port for the login use-case.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without importing persistence or token infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials, User};

/// Authenticated user together with the token issued for them.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: IssuedToken,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Look the user up by exact username, verify the password and issue a
    /// token.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`crate::domain::ErrorCode::NotFound`].
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
