//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories, token signing, password hashing) expose
//! strongly typed errors so adapters map their failures into predictable
//! variants. Driving ports return the domain [`crate::domain::Error`] and are
//! what HTTP handlers depend on.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_verifier;
mod login_service;
mod password_hasher;
mod registration_service;
mod token_service;
mod user_repository;
mod vendor_repository;
mod vendors_command;
mod vendors_query;

pub use credential_verifier::CredentialVerifier;
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use login_service::{LoginOutcome, LoginService};
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use vendor_repository::MockVendorRepository;
pub use vendor_repository::{VendorPersistenceError, VendorRepository};
#[cfg(test)]
pub use vendors_command::MockVendorsCommand;
pub use vendors_command::VendorsCommand;
#[cfg(test)]
pub use vendors_query::MockVendorsQuery;
pub use vendors_query::VendorsQuery;
