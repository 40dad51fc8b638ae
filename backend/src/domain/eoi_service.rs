//! Application intake and dashboard services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::Error;
use crate::domain::eoi::{Eoi, EoiId, EoiQuery, EoiReceipt, EoiStatus, EoiSubmission, validate_eoi};
use crate::domain::ports::{
    DashboardChange, EoiDashboard, EoiIntake, EoiRepository, EoiRepositoryError,
};

fn map_eoi_error(error: EoiRepositoryError) -> Error {
    match error {
        EoiRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("eoi repository unavailable: {message}"))
        }
        EoiRepositoryError::Query { message } => {
            Error::internal(format!("eoi repository error: {message}"))
        }
    }
}

/// Service implementing [`EoiIntake`].
#[derive(Clone)]
pub struct EoiIntakeService<R> {
    eois: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> EoiIntakeService<R> {
    /// Create an intake service; `clock` supplies both the age reference date
    /// and the submission timestamp.
    pub fn new(eois: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { eois, clock }
    }
}

#[async_trait]
impl<R> EoiIntake for EoiIntakeService<R>
where
    R: EoiRepository,
{
    async fn submit(&self, submission: &EoiSubmission) -> Result<EoiReceipt, Error> {
        let today = self.clock.local().date_naive();
        let eoi = validate_eoi(submission, today).map_err(|errors| {
            debug!(failures = errors.len(), "application rejected by validation");
            let values = serde_json::to_value(submission).unwrap_or_default();
            errors.into_error(values)
        })?;

        let id = self
            .eois
            .insert(&eoi, self.clock.utc())
            .await
            .map_err(map_eoi_error)?;
        info!(eoi_number = %id, job_reference = %eoi.job_reference, "application submitted");

        Ok(EoiReceipt {
            eoi_number: id,
            first_name: eoi.first_name,
            last_name: eoi.last_name,
            job_reference: eoi.job_reference,
            email: eoi.email,
        })
    }
}

/// Service implementing [`EoiDashboard`].
#[derive(Clone)]
pub struct EoiDashboardService<R> {
    eois: Arc<R>,
}

impl<R> EoiDashboardService<R> {
    /// Create a dashboard service.
    pub fn new(eois: Arc<R>) -> Self {
        Self { eois }
    }
}

#[async_trait]
impl<R> EoiDashboard for EoiDashboardService<R>
where
    R: EoiRepository,
{
    async fn list(&self, query: &EoiQuery) -> Result<Vec<Eoi>, Error> {
        self.eois.list(query).await.map_err(map_eoi_error)
    }

    async fn job_references(&self) -> Result<Vec<String>, Error> {
        self.eois.job_references().await.map_err(map_eoi_error)
    }

    async fn update_status(&self, id: EoiId, status: &str) -> Result<DashboardChange, Error> {
        let Ok(status) = status.parse::<EoiStatus>() else {
            debug!(eoi_number = %id, status, "ignoring unknown status value");
            return Ok(DashboardChange::StatusIgnored);
        };
        let updated = self
            .eois
            .update_status(id, status)
            .await
            .map_err(map_eoi_error)?;
        if updated {
            info!(eoi_number = %id, status = %status, "application status updated");
            Ok(DashboardChange::StatusUpdated(id))
        } else {
            Ok(DashboardChange::Missing(id))
        }
    }

    async fn delete(&self, id: EoiId) -> Result<DashboardChange, Error> {
        let deleted = self.eois.delete(id).await.map_err(map_eoi_error)?;
        if deleted {
            info!(eoi_number = %id, "application deleted");
            Ok(DashboardChange::Deleted(id))
        } else {
            Ok(DashboardChange::Missing(id))
        }
    }

    async fn delete_by_job(&self, job_reference: &str) -> Result<DashboardChange, Error> {
        let job_reference = job_reference.trim();
        if job_reference.is_empty() {
            return Err(Error::invalid_request("Please select a job reference."));
        }
        let count = self
            .eois
            .delete_by_job(job_reference)
            .await
            .map_err(map_eoi_error)?;
        warn!(job_reference, count, "applications bulk deleted");
        Ok(DashboardChange::DeletedByJob {
            job_reference: job_reference.to_owned(),
            count,
        })
    }
}
