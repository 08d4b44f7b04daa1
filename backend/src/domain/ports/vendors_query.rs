//! Driving port for vendor reads.

use async_trait::async_trait;

use crate::domain::{Error, Vendor, VendorFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorsQuery: Send + Sync {
    /// Vendors selected by `filter`, ordered by id.
    async fn list_vendors(&self, filter: &VendorFilter) -> Result<Vec<Vendor>, Error>;
}
