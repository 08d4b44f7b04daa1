//! PostgreSQL-backed `VendorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VendorPersistenceError, VendorRepository};
use crate::domain::{NewVendor, Vendor, VendorFilter, VendorId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewVendorRow, VendorRow};
use super::pool::{DbPool, PoolError};
use super::schema::vendors;

/// Diesel-backed implementation of the vendor repository port.
#[derive(Clone)]
pub struct DieselVendorRepository {
    pool: DbPool,
}

impl DieselVendorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VendorPersistenceError {
    map_basic_pool_error(error, VendorPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VendorPersistenceError {
    map_basic_diesel_error(
        error,
        VendorPersistenceError::query,
        VendorPersistenceError::connection,
    )
}

impl From<VendorRow> for Vendor {
    fn from(row: VendorRow) -> Self {
        Self {
            id: VendorId::new(row.id),
            name: row.name,
            category: row.category,
            phone: row.phone,
            vehicle_type: row.vehicle_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl VendorRepository for DieselVendorRepository {
    async fn create(&self, vendor: &NewVendor) -> Result<Vendor, VendorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewVendorRow {
            name: vendor.name.as_str(),
            category: vendor.category.as_str(),
            phone: vendor.phone.as_str(),
            vehicle_type: vendor.vehicle_type.as_str(),
        };

        diesel::insert_into(vendors::table)
            .values(&new_row)
            .returning(VendorRow::as_returning())
            .get_result::<VendorRow>(&mut conn)
            .await
            .map(Vendor::from)
            .map_err(map_diesel_error)
    }

    async fn list(&self, filter: &VendorFilter) -> Result<Vec<Vendor>, VendorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = vendors::table
            .select(VendorRow::as_select())
            .order(vendors::id.asc())
            .into_boxed();
        if let VendorFilter::Category(category) = filter {
            query = query.filter(vendors::category.eq(category.as_str()));
        }

        let rows: Vec<VendorRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Vendor::from).collect())
    }
}
