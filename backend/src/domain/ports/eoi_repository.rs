//! Port for application (EOI) persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::eoi::{Eoi, EoiId, EoiQuery, EoiStatus, NewEoi};

use super::define_port_error;

define_port_error! {
    /// Errors raised by EOI repository adapters.
    pub enum EoiRepositoryError {
        /// Repository connection could not be established.
        Connection => "eoi repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "eoi repository query failed: {message}",
    }
}

/// Reads and writes over stored applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EoiRepository: Send + Sync {
    /// Store a validated application with status `New`; returns its number.
    async fn insert(
        &self,
        eoi: &NewEoi,
        submitted_at: DateTime<Utc>,
    ) -> Result<EoiId, EoiRepositoryError>;

    /// Applications matching the filter, in the requested order.
    async fn list(&self, query: &EoiQuery) -> Result<Vec<Eoi>, EoiRepositoryError>;

    /// Distinct job references present among stored applications, sorted.
    async fn job_references(&self) -> Result<Vec<String>, EoiRepositoryError>;

    /// Change the status of one application; `false` when it does not exist.
    async fn update_status(
        &self,
        id: EoiId,
        status: EoiStatus,
    ) -> Result<bool, EoiRepositoryError>;

    /// Delete one application; `false` when it does not exist.
    async fn delete(&self, id: EoiId) -> Result<bool, EoiRepositoryError>;

    /// Delete every application for a job reference; returns the count.
    async fn delete_by_job(&self, job_reference: &str) -> Result<usize, EoiRepositoryError>;
}
