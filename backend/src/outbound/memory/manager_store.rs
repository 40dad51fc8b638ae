//! In-memory `ManagerRepository`.
//!
//! Username and email uniqueness are enforced on insert the same way the
//! database's unique indexes do, surfacing as `Conflict`.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ManagerRepository, ManagerRepositoryError};
use crate::domain::{ManagerAccount, ManagerId, NewManager};

use super::lock;

#[derive(Debug, Default)]
struct ManagerTable {
    next_id: i32,
    accounts: Vec<ManagerAccount>,
}

impl ManagerTable {
    fn account_mut(&mut self, id: ManagerId) -> Result<&mut ManagerAccount, ManagerRepositoryError> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or_else(|| ManagerRepositoryError::query(format!("manager {id} not found")))
    }
}

/// Manager accounts held in a process-local table.
#[derive(Debug, Default)]
pub struct InMemoryManagerRepository {
    table: Mutex<ManagerTable>,
}

impl InMemoryManagerRepository {
    /// Start with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored account named `username`.
    pub fn account(&self, username: &str) -> Option<ManagerAccount> {
        lock(&self.table)
            .accounts
            .iter()
            .find(|account| account.username == username)
            .cloned()
    }
}

#[async_trait]
impl ManagerRepository for InMemoryManagerRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ManagerAccount>, ManagerRepositoryError> {
        Ok(self.account(username))
    }

    async fn clear_lock(&self, id: ManagerId) -> Result<(), ManagerRepositoryError> {
        let mut table = lock(&self.table);
        let account = table.account_mut(id)?;
        account.account_locked = false;
        account.locked_until = None;
        account.login_attempts = 0;
        Ok(())
    }

    async fn record_successful_login(
        &self,
        id: ManagerId,
        at: DateTime<Utc>,
    ) -> Result<(), ManagerRepositoryError> {
        let mut table = lock(&self.table);
        let account = table.account_mut(id)?;
        account.login_attempts = 0;
        account.last_login = Some(at);
        Ok(())
    }

    async fn record_failed_attempt(&self, id: ManagerId) -> Result<u32, ManagerRepositoryError> {
        let mut table = lock(&self.table);
        let account = table.account_mut(id)?;
        account.login_attempts = account.login_attempts.saturating_add(1);
        Ok(account.login_attempts)
    }

    async fn lock_until(
        &self,
        id: ManagerId,
        until: DateTime<Utc>,
    ) -> Result<(), ManagerRepositoryError> {
        let mut table = lock(&self.table);
        let account = table.account_mut(id)?;
        account.account_locked = true;
        account.locked_until = Some(until);
        Ok(())
    }

    async fn exists_with_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, ManagerRepositoryError> {
        Ok(lock(&self.table)
            .accounts
            .iter()
            .any(|account| account.username == username || account.email == email))
    }

    async fn create(&self, manager: &NewManager) -> Result<ManagerId, ManagerRepositoryError> {
        let mut table = lock(&self.table);
        if let Some(clash) = table
            .accounts
            .iter()
            .find(|a| a.username == manager.username || a.email == manager.email)
        {
            let constraint = if clash.username == manager.username {
                "managers_username_key"
            } else {
                "managers_email_key"
            };
            return Err(ManagerRepositoryError::conflict(constraint));
        }

        table.next_id += 1;
        let id = ManagerId::new(table.next_id);
        table.accounts.push(ManagerAccount {
            id,
            username: manager.username.clone(),
            password_hash: manager.password_hash.clone(),
            email: manager.email.clone(),
            full_name: manager.full_name.clone(),
            login_attempts: 0,
            account_locked: false,
            locked_until: None,
            last_login: None,
            created_date: Utc::now(),
        });
        Ok(id)
    }
}
