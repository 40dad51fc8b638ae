//! Classification of Diesel and pool failures shared by the repositories.
//!
//! Each repository turns a [`StoreFailure`] into its own port error, so the
//! decision of what counts as a connection problem lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse failure classes the ports distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The database could not be reached or the pool was exhausted.
    Connection(String),
    /// A unique constraint rejected the write.
    Conflict(String),
    /// Anything else that went wrong while running the statement.
    Query(String),
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<DieselError> for StoreFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            other => debug!(error = %other, "diesel operation failed"),
        }

        match error {
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => Self::Conflict(
                info.constraint_name()
                    .unwrap_or("unique constraint")
                    .to_owned(),
            ),
            DieselError::DatabaseError(_, _) => Self::Query("database error".to_owned()),
            _ => Self::Query("database query error".to_owned()),
        }
    }
}
