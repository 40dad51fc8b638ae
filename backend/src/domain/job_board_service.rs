//! Public job listing service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{JobBoard, JobRepository, JobRepositoryError};
use crate::domain::{Error, JobPosting, JobSummary};

fn map_job_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("job repository unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("job repository error: {message}"))
        }
    }
}

/// Service implementing [`JobBoard`] over a job repository.
#[derive(Clone)]
pub struct JobBoardService<R> {
    jobs: Arc<R>,
}

impl<R> JobBoardService<R> {
    /// Create a job board service.
    pub fn new(jobs: Arc<R>) -> Self {
        Self { jobs }
    }
}

#[async_trait]
impl<R> JobBoard for JobBoardService<R>
where
    R: JobRepository,
{
    async fn active_postings(&self) -> Result<Vec<JobPosting>, Error> {
        self.jobs.list_active().await.map_err(map_job_error)
    }

    async fn application_choices(&self) -> Result<Vec<JobSummary>, Error> {
        self.jobs.active_summaries().await.map_err(map_job_error)
    }
}
