//! Domain primitives, rules and services.
//!
//! Purpose: hold the recruiting site's entities (applications, job postings,
//! manager accounts), the rules applied to submitted forms, and the services
//! implementing the driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - eoi: application types, validation and dashboard query selections.
//! - LoginCredentials / LoginOutcome: authentication guard contract.
//! - RegistrationForm: manager self-registration rules.
//! - JobPosting: published adverts.

pub mod auth;
pub mod eoi;
pub mod error;
pub mod jobs;
pub mod manager;
pub mod ports;
pub mod registration;

mod eoi_service;
mod job_board_service;
mod login_service;
mod registration_service;
#[cfg(test)]
pub(crate) mod test_clock;
mod trace_id;
mod validation;

pub use self::auth::{
    LOCKOUT_MINUTES, LoginCredentials, LoginOutcome, LoginValidationError, MAX_LOGIN_ATTEMPTS,
    attempts_remaining, lockout_window, minutes_remaining,
};
pub use self::eoi_service::{EoiDashboardService, EoiIntakeService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::job_board_service::JobBoardService;
pub use self::jobs::{JobPosting, JobStatus, JobSummary, bullet_items};
pub use self::login_service::ManagerLoginService;
pub use self::manager::{LockState, ManagerAccount, ManagerId, ManagerIdentity, NewManager};
pub use self::registration::{
    RegistrationForm, RegistrationReceipt, ValidRegistration, validate_registration,
};
pub use self::registration_service::{DUPLICATE_MANAGER_MESSAGE, ManagerRegistrationService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    FieldError, MAX_EMAIL_LENGTH, VALIDATION_FAILED_MESSAGE, ValidationErrors, clean, escape_html,
    is_valid_email, sanitize,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use careers::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
