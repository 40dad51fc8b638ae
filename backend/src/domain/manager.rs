//! HR manager accounts and the identity kept in the session.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database identifier of a manager account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ManagerId(i32);

impl ManagerId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lock state of an account evaluated against a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// The account is not locked.
    Unlocked,
    /// The account is flagged as locked but the lock has run out.
    Expired,
    /// The account is locked until the given instant.
    Locked { until: DateTime<Utc> },
}

/// Stored manager account.
///
/// `account_locked` is only authoritative together with `locked_until`: a
/// lock whose expiry has passed is treated as [`LockState::Expired`] and is
/// cleared lazily on the next login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerAccount {
    pub id: ManagerId,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub login_attempts: u32,
    pub account_locked: bool,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
}

impl ManagerAccount {
    /// Evaluate the lock flag and expiry at `now`.
    ///
    /// A locked flag without an expiry is treated as expired so a corrupted
    /// row can never lock an account permanently.
    pub fn lock_state(&self, now: DateTime<Utc>) -> LockState {
        if !self.account_locked {
            return LockState::Unlocked;
        }
        match self.locked_until {
            Some(until) if until > now => LockState::Locked { until },
            _ => LockState::Expired,
        }
    }

    /// Identity stored in the session after a successful login.
    pub fn identity(&self) -> ManagerIdentity {
        ManagerIdentity {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

/// Authenticated manager as remembered by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagerIdentity {
    pub id: ManagerId,
    pub username: String,
    pub full_name: String,
}

/// Validated registration ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewManager {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
}
