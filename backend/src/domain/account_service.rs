//! Account use-cases: login, registration and basic-credential checks.
//!
//! Password hashing is CPU bound, so it runs on the blocking pool. Domain
//! errors are only built back on the request task, where the trace id lives.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{
    CredentialVerifier, LoginOutcome, LoginService, PasswordHashError, PasswordHasher,
    RegistrationService, TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, ErrorCode, LoginCredentials, NewUser, NewUserRecord, PasswordHash, User,
};

pub(crate) const LOGIN_NOT_FOUND: &str = "cannot find any data";
pub(crate) const INSERT_FAILED: &str = "cannot insert data";
pub(crate) const DATABASE_UNAVAILABLE: &str = "database unavailable";
pub(crate) const USERNAME_TAKEN: &str = "username already registered";
pub(crate) const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Plaintext behind the hash that unknown usernames are verified against.
const DECOY_PASSWORD: &str = "logistic-decoy-password";

/// Service implementing the account driving ports over the user store, the
/// password hasher and the token service.
#[derive(Clone)]
pub struct AccountService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    decoy_hash: Arc<OnceLock<PasswordHash>>,
}

impl<R, H, T> AccountService<R, H, T> {
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenService,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        run_blocking(move || hasher.hash(&password))
            .await
            .unwrap_or_else(|message| Err(PasswordHashError::hash(message)))
    }

    async fn password_matches(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.clone();
        run_blocking(move || hasher.verify(&password, &hash))
            .await
            .unwrap_or_else(|message| Err(PasswordHashError::malformed(message)))
    }

    /// Spend one verification on a miss so unknown usernames cost as much as
    /// wrong passwords.
    async fn verify_against_decoy(&self, password: &str) {
        let decoy = match self.decoy_hash.get() {
            Some(hash) => hash.clone(),
            None => match self.hash_password(DECOY_PASSWORD).await {
                Ok(hash) => self.decoy_hash.get_or_init(|| hash).clone(),
                Err(err) => {
                    warn!(error = %err, "decoy hash unavailable");
                    return;
                }
            },
        };
        if let Err(err) = self.password_matches(password, &decoy).await {
            warn!(error = %err, "decoy verification failed");
        }
    }

    /// Find the user and check the password; `Ok(None)` means no match.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        let found = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_lookup_error)?;
        let Some(user) = found else {
            self.verify_against_decoy(credentials.password()).await;
            return Ok(None);
        };

        match self.password_matches(credentials.password(), user.password_hash()).await {
            Ok(true) => Ok(Some(user)),
            Ok(false) => Ok(None),
            Err(err) => {
                error!(user_id = %user.id(), error = %err, "stored password hash unreadable");
                Ok(None)
            }
        }
    }
}

async fn run_blocking<F, O>(work: F) -> Result<O, String>
where
    F: FnOnce() -> O + Send + 'static,
    O: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| err.to_string())
}

fn map_lookup_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user store unavailable");
            Error::service_unavailable(DATABASE_UNAVAILABLE)
        }
        other => {
            warn!(error = %other, "user lookup failed");
            Error::not_found(LOGIN_NOT_FOUND)
        }
    }
}

fn map_insert_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user store unavailable");
            Error::service_unavailable(DATABASE_UNAVAILABLE)
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(USERNAME_TAKEN).with_details(serde_json::json!({
                "field": "username",
                "value": username,
            }))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user insert failed");
            Error::internal(INSERT_FAILED)
        }
    }
}

#[async_trait]
impl<R, H, T> LoginService for AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let user = self
            .authenticate(credentials)
            .await?
            .ok_or_else(|| Error::not_found(LOGIN_NOT_FOUND))?;

        let token = self.tokens.issue(user.id()).map_err(|err| {
            error!(user_id = %user.id(), error = %err, "token issuance failed");
            Error::internal("cannot issue token")
        })?;

        Ok(LoginOutcome { user, token })
    }
}

#[async_trait]
impl<R, H, T> RegistrationService for AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenService,
{
    async fn register(&self, user: NewUser) -> Result<User, Error> {
        let password_hash = self.hash_password(user.password()).await.map_err(|err| {
            error!(error = %err, "password hashing failed");
            Error::internal(INSERT_FAILED)
        })?;

        let record = NewUserRecord {
            username: user.username().to_owned(),
            password_hash,
            address: user.address().to_owned(),
        };
        self.users.create(&record).await.map_err(map_insert_error)
    }
}

#[async_trait]
impl<R, H, T> CredentialVerifier for AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenService,
{
    async fn verify_credentials(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        match self.authenticate(credentials).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Error::unauthorized(INVALID_CREDENTIALS)),
            Err(err) if err.code() == ErrorCode::ServiceUnavailable => Err(err),
            Err(_) => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
