//! Driving port for manager login.
//!
//! Inbound adapters call it with validated credentials and render the
//! outcome; they never see repositories or hashes.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials, apply lockout bookkeeping and report the outcome.
    ///
    /// Store failures are returned as errors; credential problems are
    /// reported through [`LoginOutcome`].
    async fn attempt_login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
