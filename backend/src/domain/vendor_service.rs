//! Vendor directory use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{VendorPersistenceError, VendorRepository, VendorsCommand, VendorsQuery};
use crate::domain::{Error, NewVendor, Vendor, VendorFilter};

use super::account_service::{DATABASE_UNAVAILABLE, INSERT_FAILED};

pub(crate) const LIST_FAILED: &str = "error on database";

/// Service implementing [`VendorsQuery`] and [`VendorsCommand`].
#[derive(Clone)]
pub struct VendorService<R> {
    vendors: Arc<R>,
}

impl<R> VendorService<R> {
    pub fn new(vendors: Arc<R>) -> Self {
        Self { vendors }
    }
}

fn map_vendor_error(error: VendorPersistenceError, query_message: &'static str) -> Error {
    match error {
        VendorPersistenceError::Connection { message } => {
            warn!(%message, "vendor store unavailable");
            Error::service_unavailable(DATABASE_UNAVAILABLE)
        }
        VendorPersistenceError::Query { message } => {
            error!(%message, "vendor query failed");
            Error::internal(query_message)
        }
    }
}

#[async_trait]
impl<R> VendorsQuery for VendorService<R>
where
    R: VendorRepository,
{
    async fn list_vendors(&self, filter: &VendorFilter) -> Result<Vec<Vendor>, Error> {
        self.vendors
            .list(filter)
            .await
            .map_err(|err| map_vendor_error(err, LIST_FAILED))
    }
}

#[async_trait]
impl<R> VendorsCommand for VendorService<R>
where
    R: VendorRepository,
{
    async fn create_vendor(&self, vendor: NewVendor) -> Result<Vendor, Error> {
        self.vendors
            .create(&vendor)
            .await
            .map_err(|err| map_vendor_error(err, INSERT_FAILED))
    }
}
