//! Shared HTTP adapter state.
//!
//! Handlers and access gates receive this through `actix_web::web::Data`, so
//! they depend only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CredentialVerifier, LoginService, RegistrationService, TokenService, VendorsCommand,
    VendorsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub tokens: Arc<dyn TokenService>,
    pub vendors_query: Arc<dyn VendorsQuery>,
    pub vendors_command: Arc<dyn VendorsCommand>,
}

/// Parameter object grouping the account-side ports.
#[derive(Clone)]
pub struct AccountPorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub tokens: Arc<dyn TokenService>,
}

/// Parameter object grouping the vendor-side ports.
#[derive(Clone)]
pub struct VendorPorts {
    pub query: Arc<dyn VendorsQuery>,
    pub command: Arc<dyn VendorsCommand>,
}

impl HttpState {
    pub fn new(accounts: AccountPorts, vendors: VendorPorts) -> Self {
        let AccountPorts {
            login,
            registration,
            credentials,
            tokens,
        } = accounts;
        Self {
            login,
            registration,
            credentials,
            tokens,
            vendors_query: vendors.query,
            vendors_command: vendors.command,
        }
    }
}
