//! Driving port for creating manager accounts.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationForm, RegistrationReceipt};

/// Domain use-case port for registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerRegistration: Send + Sync {
    /// Validate the form, reject duplicates, hash the password and store the
    /// account.
    ///
    /// Rule failures surface as `InvalidRequest` carrying `errors` and
    /// `values` details; duplicates as `Conflict`.
    async fn register(&self, form: &RegistrationForm) -> Result<RegistrationReceipt, Error>;
}
