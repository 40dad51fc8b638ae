//! Driving port for public job listings.

use async_trait::async_trait;

use crate::domain::{Error, JobPosting, JobSummary};

/// Domain use-case port behind `/jobs` and the application form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Active postings, newest first.
    async fn active_postings(&self) -> Result<Vec<JobPosting>, Error>;

    /// Selector entries for the application form, ordered by title.
    async fn application_choices(&self) -> Result<Vec<JobSummary>, Error>;
}
