//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities and use-cases shared by the
//! HTTP adapter and the persistence layer. Types here know nothing about
//! actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, NewUser, Vendor, NewVendor, VendorFilter: records.
//! - LoginCredentials, PasswordHash, TokenClaims, IssuedToken: auth values.
//! - AccountService, VendorService: implementations of the driving ports.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod vendor;
pub mod vendor_service;

pub use self::account_service::AccountService;
pub use self::auth::{IssuedToken, LoginCredentials, PasswordHash, TokenClaims};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, NewUserRecord, User, UserId, UserValidationError};
pub use self::vendor::{NewVendor, Vendor, VendorFilter, VendorId};
pub use self::vendor_service::VendorService;

