//! Driven port for issuing and verifying bearer tokens.
//!
//! Implementations are stateless: a token is a pure function of the user id,
//! the configured signing secret, the clock and the ttl.

use crate::domain::{IssuedToken, TokenClaims, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or verifying tokens.
    pub enum TokenError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token's expiry instant has passed.
        Expired => "token expired",
        /// Signature, encoding or claim checks failed.
        Invalid { message: String } => "token invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token bound to `user_id`.
    fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError>;

    /// Verify a presented token and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
