//! Driving port for vendor writes.

use async_trait::async_trait;

use crate::domain::{Error, NewVendor, Vendor};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorsCommand: Send + Sync {
    /// Persist a vendor and return the stored record.
    async fn create_vendor(&self, vendor: NewVendor) -> Result<Vendor, Error>;
}
