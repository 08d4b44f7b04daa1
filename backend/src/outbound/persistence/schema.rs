//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` carries the `users_username_key` unique constraint.
    users (id) {
        id -> Int8,
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        address -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vendor directory; `category` is indexed for the equality filter.
    vendors (id) {
        id -> Int8,
        name -> Text,
        category -> Text,
        phone -> Text,
        vehicle_type -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, vendors);
