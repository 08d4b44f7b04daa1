//! Bearer-token configuration parsing and validation.
//!
//! The signing secret and token lifetime come from the environment so they
//! can be validated per build mode and tested in isolation.

use std::path::PathBuf;
use std::time::Duration;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{info, warn};
use zeroize::Zeroizing;

pub mod fingerprint;
mod parsing;

use parsing::{debug_warn_or_error, parse_bool};

use crate::outbound::token::DEFAULT_TOKEN_TTL;

pub(crate) const SECRET_ENV: &str = "LOGISTIC_TOKEN_SECRET";
pub(crate) const SECRET_FILE_ENV: &str = "LOGISTIC_TOKEN_SECRET_FILE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "LOGISTIC_TOKEN_ALLOW_EPHEMERAL";
pub(crate) const TTL_ENV: &str = "LOGISTIC_TOKEN_TTL_SECS";
/// Minimum secret length accepted by release builds.
pub const SECRET_MIN_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const TTL_EXPECTED: &str = "a positive number of seconds";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short secrets and bad toggles, with warnings.
    Debug,
    /// Release builds require a long configured secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logistic::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated token settings.
pub struct TokenSettings {
    /// HS256 signing secret shared by every issue and verify call.
    pub secret: Zeroizing<Vec<u8>>,
    pub ttl: Duration,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &fingerprint::secret_fingerprint(&self.secret))
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    #[error("missing signing secret: set {SECRET_ENV} or {SECRET_FILE_ENV}")]
    MissingSecret,
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read signing secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("signing secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    #[error("{ALLOW_EPHEMERAL_ENV} must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// An inline secret wins over a secret file. Debug builds fall back to a
/// random per-process secret only when ephemeral secrets are allowed.
///
/// # Examples
///
/// ```rust
/// use logistic::inbound::http::token_config::{token_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "LOGISTIC_TOKEN_SECRET" => Some("x".repeat(32)),
///     "LOGISTIC_TOKEN_TTL_SECS" => Some("600".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert_eq!(settings.ttl.as_secs(), 600);
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let secret = secret_from_env(env, mode, allow_ephemeral)?;
    let ttl = ttl_from_env(env, mode)?;
    info!(
        fingerprint = %fingerprint::secret_fingerprint(&secret),
        ttl_secs = ttl.as_secs(),
        "token settings loaded"
    );
    Ok(TokenSettings { secret, ttl })
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None => debug_warn_or_error(
            mode,
            false,
            TokenConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || warn!(value = %value, "invalid {ALLOW_EPHEMERAL_ENV}; defaulting to disabled"),
        ),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let configured = match (env.string(SECRET_ENV), env.string(SECRET_FILE_ENV)) {
        (Some(inline), _) if !inline.is_empty() => {
            Some(Zeroizing::new(Zeroizing::new(inline).as_bytes().to_vec()))
        }
        (_, Some(path)) => {
            let path = PathBuf::from(path);
            let bytes = std::fs::read(&path)
                .map_err(|source| TokenConfigError::SecretRead { path, source })?;
            Some(Zeroizing::new(trim_trailing_newline(bytes)))
        }
        _ => None,
    };

    match configured {
        Some(secret) => check_length(secret, mode),
        None if allow_ephemeral => {
            warn!("using ephemeral signing secret (dev only); tokens die with the process");
            Ok(ephemeral_secret())
        }
        None => Err(TokenConfigError::MissingSecret),
    }
}

fn check_length(
    secret: Zeroizing<Vec<u8>>,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let length = secret.len();
    if length >= SECRET_MIN_LEN {
        return Ok(secret);
    }
    debug_warn_or_error(
        mode,
        secret,
        TokenConfigError::SecretTooShort {
            length,
            min_len: SECRET_MIN_LEN,
        },
        || warn!(length, "signing secret shorter than {SECRET_MIN_LEN} bytes"),
    )
}

/// Secret files written with `echo` end in a newline that is not key material.
fn trim_trailing_newline(mut bytes: Vec<u8>) -> Vec<u8> {
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    bytes
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(vec![0_u8; SECRET_MIN_LEN]);
    OsRng.fill_bytes(secret.as_mut_slice());
    secret
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, TokenConfigError> {
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(DEFAULT_TOKEN_TTL);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => debug_warn_or_error(
            mode,
            DEFAULT_TOKEN_TTL,
            TokenConfigError::InvalidEnv {
                name: TTL_ENV,
                value: value.clone(),
                expected: TTL_EXPECTED,
            },
            || warn!(value = %value, "invalid {TTL_ENV}; using default"),
        ),
    }
}
