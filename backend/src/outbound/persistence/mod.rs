//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; row structs (`models.rs`) and the table DSL (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use logistic::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/logistic")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod diesel_vendor_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vendor_repository::DieselVendorRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
