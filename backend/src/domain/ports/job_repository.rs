//! Port for reading job postings.

use async_trait::async_trait;

use crate::domain::{JobPosting, JobSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Repository connection could not be established.
        Connection => "job repository connection failed: {message}",
        /// Query failed during execution.
        Query => "job repository query failed: {message}",
    }
}

/// Read-only access to published postings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Active postings, newest first.
    async fn list_active(&self) -> Result<Vec<JobPosting>, JobRepositoryError>;

    /// Reference and title of every active posting, ordered by title.
    async fn active_summaries(&self) -> Result<Vec<JobSummary>, JobRepositoryError>;
}
