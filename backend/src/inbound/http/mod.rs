//! HTTP inbound adapter exposing the REST endpoints.

pub mod access;
pub mod binding;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;
pub mod vendors;

pub use error::ApiResult;
