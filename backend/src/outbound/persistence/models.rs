//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{users, vendors};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub address: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vendors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VendorRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub phone: String,
    pub vehicle_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vendors)]
pub(crate) struct NewVendorRow<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub phone: &'a str,
    pub vehicle_type: &'a str,
}
