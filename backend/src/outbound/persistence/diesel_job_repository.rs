//! PostgreSQL-backed `JobRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{JobPosting, JobStatus, JobSummary, bullet_items};

use super::diesel_error_mapping::StoreFailure;
use super::models::JobRow;
use super::pool::DbPool;
use super::schema::jobs;

const ACTIVE: &str = "Active";

/// Diesel implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> JobRepositoryError {
    match failure.into() {
        StoreFailure::Connection(message) => JobRepositoryError::connection(message),
        StoreFailure::Conflict(message) | StoreFailure::Query(message) => {
            JobRepositoryError::query(message)
        }
    }
}

fn row_to_posting(row: JobRow) -> JobPosting {
    JobPosting {
        status: JobStatus::from_stored(&row.status),
        key_responsibilities: bullet_items(&row.key_responsibilities),
        essential_requirements: bullet_items(&row.essential_requirements),
        preferable_skills: bullet_items(&row.preferable_skills),
        reference: row.job_reference,
        title: row.job_title,
        overview: row.job_overview,
        salary_range: row.salary_range,
        reports_to: row.reports_to,
        location: row.location,
        job_type: row.job_type,
        posted_date: row.posted_date,
    }
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn list_active(&self) -> Result<Vec<JobPosting>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<JobRow> = jobs::table
            .filter(jobs::status.eq(ACTIVE))
            .order((jobs::posted_date.desc(), jobs::job_reference.asc()))
            .select(JobRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(rows.into_iter().map(row_to_posting).collect())
    }

    async fn active_summaries(&self) -> Result<Vec<JobSummary>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<(String, String)> = jobs::table
            .filter(jobs::status.eq(ACTIVE))
            .order(jobs::job_title.asc())
            .select((jobs::job_reference, jobs::job_title))
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(rows
            .into_iter()
            .map(|(reference, title)| JobSummary { reference, title })
            .collect())
    }
}
