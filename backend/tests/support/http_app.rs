//! In-process application wired like the production server, over in-memory
//! stores and a controllable clock.

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};

use logistic::Trace;
use logistic::domain::{AccountService, VendorService};
use logistic::inbound::http::health::{HealthState, live, ready};
use logistic::inbound::http::state::{AccountPorts, HttpState, VendorPorts};
use logistic::inbound::http::users::{login, register};
use logistic::inbound::http::vendors::{create_vendor, list_vendors, vendors_by_category};
use logistic::middleware::Timeout;
use logistic::outbound::password::Argon2PasswordHasher;
use logistic::outbound::token::{DEFAULT_TOKEN_TTL, JwtTokenService};
use logistic::test_support::{InMemoryUserRepository, InMemoryVendorRepository, MutableClock};

pub const SECRET: &[u8] = b"integration-secret-0123456789abcdef";

/// Handles onto the doubles behind a [`Harness`] state.
#[derive(Clone)]
pub struct Harness {
    pub state: web::Data<HttpState>,
    pub health: web::Data<HealthState>,
    pub users: Arc<InMemoryUserRepository>,
    pub vendors: Arc<InMemoryVendorRepository>,
    pub clock: Arc<MutableClock>,
    pub tokens: Arc<JwtTokenService>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(MutableClock::new(
            Utc.timestamp_opt(1_700_000_000, 0)
                .single()
                .expect("timestamp"),
        ));
        let users = Arc::new(InMemoryUserRepository::default());
        let vendors = Arc::new(InMemoryVendorRepository::default());
        let tokens = Arc::new(JwtTokenService::new(SECRET, DEFAULT_TOKEN_TTL, clock.clone()));
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            tokens.clone(),
        ));
        let vendor_service = Arc::new(VendorService::new(vendors.clone()));

        let state = web::Data::new(HttpState::new(
            AccountPorts {
                login: accounts.clone(),
                registration: accounts.clone(),
                credentials: accounts,
                tokens: tokens.clone(),
            },
            VendorPorts {
                query: vendor_service.clone(),
                command: vendor_service,
            },
        ));
        let health = web::Data::new(HealthState::new());
        health.mark_ready();

        Self {
            state,
            health,
            users,
            vendors,
            clock,
            tokens,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.health.clone())
            .app_data(self.state.clone())
            .service(
                web::scope("/orm")
                    .service(login)
                    .service(register)
                    .service(list_vendors)
                    .service(vendors_by_category)
                    .service(create_vendor),
            )
            .service(ready)
            .service(live)
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(Timeout::new(Duration::from_secs(5)))
            .wrap(Trace)
    }
}

pub fn basic_header(username: &str, password: &str) -> String {
    use base64::Engine as _;
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"))
    )
}
