//! Server settings loaded via OrthoConfig and the runtime server config.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::web;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use logistic::inbound::http::state::HttpState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while resolving server settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("LOGISTIC_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Process settings read from `LOGISTIC_*` variables, configuration files
/// and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOGISTIC")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds a request may run before it is answered with 503.
    pub request_timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE).max(1)
    }

    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
    pub(crate) http_state: web::Data<HttpState>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        request_timeout: Duration,
        http_state: web::Data<HttpState>,
    ) -> Self {
        Self {
            bind_addr,
            request_timeout,
            http_state,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 4] = [
        "LOGISTIC_BIND_ADDR",
        "LOGISTIC_DATABASE_URL",
        "LOGISTIC_POOL_MAX_SIZE",
        "LOGISTIC_REQUEST_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("logistic")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8000".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert_eq!(
            settings.request_timeout().expect("default timeout"),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert!(matches!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LOGISTIC_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "LOGISTIC_DATABASE_URL",
                Some("postgres://app@localhost/logistic".to_owned()),
            ),
            ("LOGISTIC_POOL_MAX_SIZE", Some("4".to_owned())),
            ("LOGISTIC_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(
            settings.database_url().expect("url"),
            "postgres://app@localhost/logistic"
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert_eq!(
            settings.request_timeout().expect("timeout"),
            Duration::from_secs(5)
        );
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            pool_max_size: None,
            request_timeout_secs: Some(0),
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(matches!(
            settings.request_timeout(),
            Err(SettingsError::ZeroTimeout)
        ));
    }
}
