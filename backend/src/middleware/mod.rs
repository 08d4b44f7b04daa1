//! Request middleware for cross-cutting request lifecycle concerns.

pub mod timeout;
pub mod trace;

pub use timeout::Timeout;
pub use trace::Trace;
