//! In-memory `JobRepository`.

use async_trait::async_trait;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{JobPosting, JobStatus, JobSummary};

/// Fixed set of postings held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    postings: Vec<JobPosting>,
}

impl InMemoryJobRepository {
    /// Serve `postings`; inactive ones are stored but never listed.
    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }

    fn active(&self) -> impl Iterator<Item = &JobPosting> {
        self.postings
            .iter()
            .filter(|posting| posting.status == JobStatus::Active)
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn list_active(&self) -> Result<Vec<JobPosting>, JobRepositoryError> {
        let mut postings: Vec<JobPosting> = self.active().cloned().collect();
        postings.sort_by(|a, b| {
            b.posted_date
                .cmp(&a.posted_date)
                .then_with(|| a.reference.cmp(&b.reference))
        });
        Ok(postings)
    }

    async fn active_summaries(&self) -> Result<Vec<JobSummary>, JobRepositoryError> {
        let mut summaries: Vec<JobSummary> = self.active().map(JobSummary::from).collect();
        summaries.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(summaries)
    }
}
