//! Builders wiring repository-backed services into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use logistic::domain::{AccountService, VendorService};
use logistic::inbound::http::state::{AccountPorts, HttpState, VendorPorts};
use logistic::inbound::http::token_config::TokenSettings;
use logistic::outbound::password::Argon2PasswordHasher;
use logistic::outbound::persistence::{DbPool, DieselUserRepository, DieselVendorRepository};
use logistic::outbound::token::JwtTokenService;

/// Build the handler state over the database pool and the signing secret.
pub fn build_http_state(pool: &DbPool, tokens: &TokenSettings) -> web::Data<HttpState> {
    let token_service = Arc::new(JwtTokenService::new(
        &tokens.secret,
        tokens.ttl,
        Arc::new(DefaultClock),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        token_service.clone(),
    ));
    let vendors = Arc::new(VendorService::new(Arc::new(DieselVendorRepository::new(
        pool.clone(),
    ))));

    web::Data::new(HttpState::new(
        AccountPorts {
            login: accounts.clone(),
            registration: accounts.clone(),
            credentials: accounts,
            tokens: token_service,
        },
        VendorPorts {
            query: vendors.clone(),
            command: vendors,
        },
    ))
}
