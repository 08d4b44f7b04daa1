//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockCredentialVerifier, MockLoginService, MockRegistrationService, MockTokenService,
    MockVendorsCommand, MockVendorsQuery,
};

use super::state::{AccountPorts, HttpState, VendorPorts};

/// Mocked ports for handler tests.
///
/// Any port left without expectations panics when called, which doubles as
/// an assertion that a rejected request never reached it.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub credentials: MockCredentialVerifier,
    pub tokens: MockTokenService,
    pub vendors_query: MockVendorsQuery,
    pub vendors_command: MockVendorsCommand,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            AccountPorts {
                login: Arc::new(self.login),
                registration: Arc::new(self.registration),
                credentials: Arc::new(self.credentials),
                tokens: Arc::new(self.tokens),
            },
            VendorPorts {
                query: Arc::new(self.vendors_query),
                command: Arc::new(self.vendors_command),
            },
        ))
    }
}
