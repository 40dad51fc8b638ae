//! Port for manager account persistence.
//!
//! The failed-attempt counter is incremented by the store itself and the new
//! value returned, so concurrent failures can never lose an increment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ManagerAccount, ManagerId, NewManager};

use super::define_port_error;

define_port_error! {
    /// Errors raised by manager repository adapters.
    pub enum ManagerRepositoryError {
        /// Repository connection could not be established.
        Connection => "manager repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "manager repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict => "manager repository conflict: {message}",
    }
}

/// Persistence operations behind login and registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerRepository: Send + Sync {
    /// Fetch an account by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ManagerAccount>, ManagerRepositoryError>;

    /// Clear the lock flag and expiry and reset the counter to zero.
    async fn clear_lock(&self, id: ManagerId) -> Result<(), ManagerRepositoryError>;

    /// Reset the counter and stamp the last-login time.
    async fn record_successful_login(
        &self,
        id: ManagerId,
        at: DateTime<Utc>,
    ) -> Result<(), ManagerRepositoryError>;

    /// Atomically add one to the counter and return the new value.
    async fn record_failed_attempt(&self, id: ManagerId) -> Result<u32, ManagerRepositoryError>;

    /// Lock the account until `until`.
    async fn lock_until(
        &self,
        id: ManagerId,
        until: DateTime<Utc>,
    ) -> Result<(), ManagerRepositoryError>;

    /// Whether any account already uses `username` or `email`.
    async fn exists_with_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, ManagerRepositoryError>;

    /// Insert a new account and return its identifier.
    async fn create(&self, manager: &NewManager) -> Result<ManagerId, ManagerRepositoryError>;
}
