//! HS256 JWT implementation of the [`TokenService`] port.
//!
//! Expiry is checked against the injected [`Clock`] rather than the library's
//! wall-clock check so tests can move time deterministically. There is no
//! leeway: a token whose `exp` equals the current second is already expired.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{IssuedToken, TokenClaims, UserId};

/// Default lifetime of an issued token.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Stateless signer and verifier keyed by one shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service from raw secret bytes.
    ///
    /// `ttl` values too large for a timestamp offset are clamped to the
    /// largest representable span.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }
}

fn describe(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidSignature => "signature mismatch",
        ErrorKind::InvalidAlgorithm => "unexpected algorithm",
        ErrorKind::MissingRequiredClaim(_) => "missing required claim",
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => "malformed token",
        ErrorKind::Json(_) => "malformed claims",
        _ => "verification failed",
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError> {
        let expires_at = self
            .clock
            .utc()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::signing("expiry overflows the calendar"))?;
        let claims = TokenClaims::authorized(user_id, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(
            |err| {
                error!(%user_id, error = %err, "failed to sign token");
                TokenError::signing(err.to_string())
            },
        )?;
        Ok(IssuedToken::new(token, expires_at))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(|err| {
            debug!(error = %err, "token rejected");
            TokenError::invalid(describe(err.kind()))
        })?;

        let claims = data.claims;
        if claims.is_expired_at(self.clock.utc()) {
            return Err(TokenError::expired());
        }
        if !claims.authorized {
            return Err(TokenError::invalid("token not authorized"));
        }
        if claims.user_id().is_none() {
            return Err(TokenError::invalid("token subject is not a user id"));
        }
        Ok(claims)
    }
}
