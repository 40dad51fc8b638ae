//! PostgreSQL-backed `ManagerRepository` implementation using Diesel ORM.
//!
//! The failed-attempt counter is bumped in a single `UPDATE ... RETURNING`
//! so concurrent bad logins cannot lose increments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::{AsQuery, QueryFragment, QueryId};
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ManagerRepository, ManagerRepositoryError};
use crate::domain::{ManagerAccount, ManagerId, NewManager};

use super::diesel_error_mapping::StoreFailure;
use super::models::{ManagerRow, NewManagerRow};
use super::pool::DbPool;
use super::schema::managers;

/// Diesel-backed implementation of the manager repository port.
#[derive(Clone)]
pub struct DieselManagerRepository {
    pool: DbPool,
}

impl DieselManagerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> ManagerRepositoryError {
    match failure.into() {
        StoreFailure::Connection(message) => ManagerRepositoryError::connection(message),
        StoreFailure::Conflict(message) => ManagerRepositoryError::conflict(message),
        StoreFailure::Query(message) => ManagerRepositoryError::query(message),
    }
}

fn counter_to_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Build the failed-login bump: one `UPDATE ... RETURNING` statement.
pub(crate) fn failed_attempt_statement(
    id: ManagerId,
) -> impl AsQuery<SqlType = Integer, Query: QueryFragment<Pg> + QueryId + Send + 'static>
+ Send
+ 'static {
    diesel::update(managers::table.find(id.get()))
        .set(managers::login_attempts.eq(managers::login_attempts + 1))
        .returning(managers::login_attempts)
}

fn row_to_account(row: ManagerRow) -> ManagerAccount {
    ManagerAccount {
        id: ManagerId::new(row.manager_id),
        username: row.username,
        password_hash: row.password_hash,
        email: row.email,
        full_name: row.full_name,
        login_attempts: counter_to_u32(row.login_attempts),
        account_locked: row.account_locked,
        locked_until: row.locked_until,
        last_login: row.last_login,
        created_date: row.created_date,
    }
}

#[async_trait]
impl ManagerRepository for DieselManagerRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ManagerAccount>, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = managers::table
            .filter(managers::username.eq(username))
            .select(ManagerRow::as_select())
            .first::<ManagerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        Ok(row.map(row_to_account))
    }

    async fn clear_lock(&self, id: ManagerId) -> Result<(), ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::update(managers::table.find(id.get()))
            .set((
                managers::account_locked.eq(false),
                managers::locked_until.eq(None::<DateTime<Utc>>),
                managers::login_attempts.eq(0),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_failure)
    }

    async fn record_successful_login(
        &self,
        id: ManagerId,
        at: DateTime<Utc>,
    ) -> Result<(), ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::update(managers::table.find(id.get()))
            .set((
                managers::login_attempts.eq(0),
                managers::last_login.eq(Some(at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_failure)
    }

    async fn record_failed_attempt(&self, id: ManagerId) -> Result<u32, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let attempts: i32 = failed_attempt_statement(id)
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(counter_to_u32(attempts))
    }

    async fn lock_until(
        &self,
        id: ManagerId,
        until: DateTime<Utc>,
    ) -> Result<(), ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::update(managers::table.find(id.get()))
            .set((
                managers::account_locked.eq(true),
                managers::locked_until.eq(Some(until)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_failure)
    }

    async fn exists_with_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::select(exists(
            managers::table.filter(
                managers::username
                    .eq(username)
                    .or(managers::email.eq(email)),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_failure)
    }

    async fn create(&self, manager: &NewManager) -> Result<ManagerId, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = NewManagerRow {
            username: &manager.username,
            password_hash: &manager.password_hash,
            email: &manager.email,
            full_name: &manager.full_name,
        };
        let id: i32 = diesel::insert_into(managers::table)
            .values(&row)
            .returning(managers::manager_id)
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(ManagerId::new(id))
    }
}
