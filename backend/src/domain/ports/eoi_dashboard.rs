//! Driving port for the HR dashboard.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::eoi::{Eoi, EoiId, EoiQuery};

/// Outcome of a dashboard mutation, used for the confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardChange {
    /// Status was changed on an existing application.
    StatusUpdated(EoiId),
    /// The requested status was not recognised; nothing changed.
    StatusIgnored,
    /// One application was removed.
    Deleted(EoiId),
    /// Applications for a job were removed.
    DeletedByJob { job_reference: String, count: usize },
    /// The referenced application did not exist.
    Missing(EoiId),
}

impl DashboardChange {
    /// Message shown after the redirect, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::StatusUpdated(id) => Some(format!("Status updated for application #{id}.")),
            Self::StatusIgnored => None,
            Self::Deleted(id) => Some(format!("Application #{id} has been deleted.")),
            Self::DeletedByJob { job_reference, .. } => Some(format!(
                "All applications for job reference {job_reference} have been deleted."
            )),
            Self::Missing(id) => Some(format!("Application #{id} was not found.")),
        }
    }
}

/// Domain use-case port behind `/manager/manage`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EoiDashboard: Send + Sync {
    /// Applications matching the query.
    async fn list(&self, query: &EoiQuery) -> Result<Vec<Eoi>, Error>;

    /// Distinct job references for the bulk-delete selector.
    async fn job_references(&self) -> Result<Vec<String>, Error>;

    /// Set the status from its raw form value; unknown values are ignored.
    async fn update_status(&self, id: EoiId, status: &str) -> Result<DashboardChange, Error>;

    /// Remove one application.
    async fn delete(&self, id: EoiId) -> Result<DashboardChange, Error>;

    /// Remove every application for a job reference.
    async fn delete_by_job(&self, job_reference: &str) -> Result<DashboardChange, Error>;
}
