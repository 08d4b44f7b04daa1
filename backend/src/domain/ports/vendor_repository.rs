//! Port abstraction for vendor persistence adapters.
use async_trait::async_trait;

use crate::domain::{NewVendor, Vendor, VendorFilter};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vendor repository adapters.
    pub enum VendorPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "vendor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vendor repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorRepository: Send + Sync {
    /// Insert a vendor and return the stored record.
    async fn create(&self, vendor: &NewVendor) -> Result<Vendor, VendorPersistenceError>;

    /// Vendors selected by `filter`, ordered by id.
    async fn list(&self, filter: &VendorFilter) -> Result<Vec<Vendor>, VendorPersistenceError>;
}
