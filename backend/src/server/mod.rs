//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};
pub use state_builders::build_http_state;

use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use logistic::Trace;
#[cfg(debug_assertions)]
use logistic::doc::ApiDoc;
use logistic::inbound::http::health::{HealthState, live, ready};
use logistic::inbound::http::state::HttpState;
use logistic::inbound::http::users::{login, register};
use logistic::inbound::http::vendors::{create_vendor, list_vendors, vendors_by_category};
use logistic::middleware::Timeout;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    request_timeout: Duration,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/orm")
        .service(login)
        .service(register)
        .service(list_vendors)
        .service(vendors_by_category)
        .service(create_vendor);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Registered innermost first: Trace sees every request before Timeout.
    app.wrap(NormalizePath::new(TrailingSlash::Trim))
        .wrap(Timeout::new(request_timeout))
        .wrap(Trace)
}

/// Construct the Actix HTTP server and mark the service ready.
///
/// Actix's own signal handling is disabled; pair the server with
/// [`drain_on_shutdown_signal`] so liveness drops before connections drain.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        request_timeout,
        http_state,
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            request_timeout,
        )
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for SIGINT or SIGTERM, then drain the server.
pub async fn drain_on_shutdown_signal(
    handle: ServerHandle,
    health_state: web::Data<HealthState>,
) {
    if let Err(err) = shutdown_signal().await {
        warn!(error = %err, "shutdown signal listener failed");
        return;
    }
    drain(&handle, &health_state).await;
}

async fn drain(handle: &ServerHandle, health_state: &HealthState) {
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn draining_drops_liveness_and_stops_the_server() {
        let health_state = HealthState::new();
        health_state.mark_ready();
        let server = HttpServer::new(App::new)
            .disable_signals()
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain(&handle, &health_state).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
