//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserRecord, PasswordHash, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        username,
        password_hash,
        address,
        created_at,
        updated_at,
    } = row;

    let id = UserId::new(id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(
        id,
        username,
        PasswordHash::from_phc(password_hash),
        address,
        created_at,
        updated_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: user.username.as_str(),
            password_hash: user.password_hash.as_str(),
            address: user.address.as_str(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, USERNAME_UNIQUE_CONSTRAINT) {
                    UserPersistenceError::duplicate_username(user.username.as_str())
                } else {
                    map_diesel_error(err)
                }
            })?;

        row_to_user(row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
