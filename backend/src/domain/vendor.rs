//! Vendor directory records.

use std::fmt;

use chrono::{DateTime, Utc};

/// Store-assigned vendor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VendorId(i64);

impl VendorId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted vendor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub category: String,
    pub phone: String,
    pub vehicle_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vendor fields supplied by an authenticated writer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewVendor {
    pub name: String,
    pub category: String,
    pub phone: String,
    pub vehicle_type: String,
}

/// Selection applied when listing vendors.
///
/// Only a single equality predicate on `category` is supported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VendorFilter {
    #[default]
    All,
    Category(String),
}

impl VendorFilter {
    /// Whether `vendor` is selected by this filter.
    ///
    /// # Examples
    /// ```
    /// use logistic::domain::VendorFilter;
    ///
    /// let filter = VendorFilter::Category("truck".into());
    /// assert!(filter.matches_category("truck"));
    /// assert!(!filter.matches_category("Truck"));
    /// assert!(VendorFilter::All.matches_category("anything"));
    /// ```
    pub fn matches_category(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => wanted == category,
        }
    }
}
