//! Driving port for submitting applications.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::eoi::{EoiReceipt, EoiSubmission};

/// Domain use-case port for the public application form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EoiIntake: Send + Sync {
    /// Validate and store a submission.
    ///
    /// Rule failures surface as `InvalidRequest` carrying `errors` and
    /// `values` details.
    async fn submit(&self, submission: &EoiSubmission) -> Result<EoiReceipt, Error>;
}
