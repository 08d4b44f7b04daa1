//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{
    UserPersistenceError, UserRepository, VendorPersistenceError, VendorRepository,
};
use crate::domain::{NewUserRecord, NewVendor, User, UserId, Vendor, VendorFilter, VendorId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Clock whose current instant only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *lock(&self.0) += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

/// User store kept in memory, enforcing username uniqueness like the
/// database constraint does.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    offline: AtomicBool,
}

impl InMemoryUserRepository {
    /// Make every call fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> Result<(), UserPersistenceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(UserPersistenceError::connection("store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUserRecord) -> Result<User, UserPersistenceError> {
        self.check_online()?;
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.username() == user.username) {
            return Err(UserPersistenceError::duplicate_username(user.username.as_str()));
        }
        let next_id = i64::try_from(users.len())
            .map_err(|err| UserPersistenceError::query(err.to_string()))?
            + 1;
        let id = UserId::new(next_id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let now = Utc::now();
        let stored = User::new(
            id,
            user.username.clone(),
            user.password_hash.clone(),
            user.address.clone(),
            now,
            now,
        );
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        self.check_online()?;
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }
}

/// Vendor store kept in memory, listing in id order.
#[derive(Default)]
pub struct InMemoryVendorRepository {
    vendors: Mutex<Vec<Vendor>>,
    offline: AtomicBool,
}

impl InMemoryVendorRepository {
    /// Make every call fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        lock(&self.vendors).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> Result<(), VendorPersistenceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(VendorPersistenceError::connection("store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl VendorRepository for InMemoryVendorRepository {
    async fn create(&self, vendor: &NewVendor) -> Result<Vendor, VendorPersistenceError> {
        self.check_online()?;
        let mut vendors = lock(&self.vendors);
        let next_id = i64::try_from(vendors.len())
            .map_err(|err| VendorPersistenceError::query(err.to_string()))?
            + 1;
        let now = Utc::now();
        let stored = Vendor {
            id: VendorId::new(next_id),
            name: vendor.name.clone(),
            category: vendor.category.clone(),
            phone: vendor.phone.clone(),
            vehicle_type: vendor.vehicle_type.clone(),
            created_at: now,
            updated_at: now,
        };
        vendors.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, filter: &VendorFilter) -> Result<Vec<Vendor>, VendorPersistenceError> {
        self.check_online()?;
        Ok(lock(&self.vendors)
            .iter()
            .filter(|v| filter.matches_category(&v.category))
            .cloned()
            .collect())
    }
}
