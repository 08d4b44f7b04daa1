//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **token**: HS256 JWT signing and verification
//! - **password**: Argon2id password hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod password;
pub mod persistence;
pub mod token;
