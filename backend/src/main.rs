//! Backend entry-point: applies migrations, builds the pool and serves the
//! REST endpoints with OpenAPI docs.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use logistic::inbound::http::health::HealthState;
use logistic::inbound::http::token_config::{BuildMode, token_settings_from_env};
use logistic::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{
    ServerConfig, ServerSettings, build_http_state, create_server, drain_on_shutdown_signal,
};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| startup_error("failed to load settings", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| startup_error("invalid settings", e))?;
    let request_timeout = settings
        .request_timeout()
        .map_err(|e| startup_error("invalid settings", e))?;
    let database_url = settings
        .database_url()
        .map_err(|e| startup_error("invalid settings", e))?
        .to_owned();

    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| startup_error("invalid token settings", e))?;

    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|e| startup_error("migration task failed", e))?
        .map_err(|e| startup_error("failed to apply migrations", e))?;
    info!(applied, "database migrations up to date");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(|e| startup_error("failed to build database pool", e))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, request_timeout, build_http_state(&pool, &tokens));
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_shutdown_signal(server.handle(), health_state));
    info!(%bind_addr, "listening");
    server.await
}
