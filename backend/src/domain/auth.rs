//! Manager login primitives: credentials, outcomes and lockout policy.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroizing;

use super::ManagerIdentity;

/// Consecutive failed attempts that lock an account.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Minutes an account stays locked once [`MAX_LOGIN_ATTEMPTS`] is reached.
pub const LOCKOUT_MINUTES: i64 = 30;

/// Lockout window as a duration.
pub fn lockout_window() -> Duration {
    Duration::minutes(LOCKOUT_MINUTES)
}

/// Domain error returned when login form values are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "Username is required."),
            Self::EmptyPassword => write!(f, "Password is required."),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Login form values checked for presence.
///
/// The username is trimmed; the password is kept exactly as typed and wiped
/// from memory on drop.
///
/// # Examples
/// ```
/// use careers::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "Admin@123").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "Admin@123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Result of a login attempt that reached the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; the counter was reset.
    Success(ManagerIdentity),
    /// Unknown user or wrong password.
    InvalidCredentials { attempts_remaining: u32 },
    /// The account is locked for roughly this many more minutes.
    AccountLocked { minutes_remaining: i64 },
}

/// Whole minutes until `until`, rounded up, never below one.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use careers::domain::minutes_remaining;
///
/// let now = Utc::now();
/// assert_eq!(minutes_remaining(now + Duration::seconds(61), now), 2);
/// ```
pub fn minutes_remaining(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (until - now).num_seconds().max(0);
    ((seconds + 59) / 60).max(1)
}

/// Attempts left after `failed` consecutive failures.
pub fn attempts_remaining(failed: u32) -> u32 {
    MAX_LOGIN_ATTEMPTS.saturating_sub(failed)
}
