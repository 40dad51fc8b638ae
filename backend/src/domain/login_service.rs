//! Manager login with attempt counting and a time-boxed lockout.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginService, ManagerRepository, ManagerRepositoryError, PasswordHashError, PasswordHasher,
};
use crate::domain::{
    Error, LockState, LoginCredentials, LoginOutcome, MAX_LOGIN_ATTEMPTS, attempts_remaining,
    lockout_window, minutes_remaining,
};

/// Map manager repository failures onto domain errors.
pub(crate) fn map_manager_error(error: ManagerRepositoryError) -> Error {
    match error {
        ManagerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("manager repository unavailable: {message}"))
        }
        ManagerRepositoryError::Query { message } => {
            Error::internal(format!("manager repository error: {message}"))
        }
        ManagerRepositoryError::Conflict { message } => {
            Error::conflict(format!("manager already exists: {message}"))
        }
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Login service implementing [`LoginService`] over a manager repository
/// and a password hasher.
#[derive(Clone)]
pub struct ManagerLoginService<R, H> {
    managers: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<R, H> ManagerLoginService<R, H> {
    /// Create a login service.
    pub fn new(managers: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            managers,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<R, H> LoginService for ManagerLoginService<R, H>
where
    R: ManagerRepository,
    H: PasswordHasher,
{
    async fn attempt_login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let username = credentials.username();
        let Some(account) = self
            .managers
            .find_by_username(username)
            .await
            .map_err(map_manager_error)?
        else {
            warn!(username, "login attempt for unknown manager");
            return Ok(LoginOutcome::InvalidCredentials {
                attempts_remaining: MAX_LOGIN_ATTEMPTS,
            });
        };

        let now = self.clock.utc();
        match account.lock_state(now) {
            LockState::Locked { until } => {
                let minutes = minutes_remaining(until, now);
                warn!(username, minutes_remaining = minutes, "login refused: account locked");
                return Ok(LoginOutcome::AccountLocked {
                    minutes_remaining: minutes,
                });
            }
            LockState::Expired => {
                self.managers
                    .clear_lock(account.id)
                    .await
                    .map_err(map_manager_error)?;
                info!(username, "expired account lock cleared");
            }
            LockState::Unlocked => {}
        }

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_hash_error)?;

        if verified {
            self.managers
                .record_successful_login(account.id, now)
                .await
                .map_err(map_manager_error)?;
            info!(username, manager_id = %account.id, "manager logged in");
            return Ok(LoginOutcome::Success(account.identity()));
        }

        let failed = self
            .managers
            .record_failed_attempt(account.id)
            .await
            .map_err(map_manager_error)?;

        if failed >= MAX_LOGIN_ATTEMPTS {
            let until = now + lockout_window();
            self.managers
                .lock_until(account.id, until)
                .await
                .map_err(map_manager_error)?;
            let minutes = minutes_remaining(until, now);
            warn!(username, failed, minutes_remaining = minutes, "account locked after failed logins");
            return Ok(LoginOutcome::AccountLocked {
                minutes_remaining: minutes,
            });
        }

        let remaining = attempts_remaining(failed);
        warn!(username, failed, attempts_remaining = remaining, "login failed: wrong password");
        Ok(LoginOutcome::InvalidCredentials {
            attempts_remaining: remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockManagerRepository, MockPasswordHasher};
    use crate::domain::test_clock::{fixture_clock, fixture_now};
    use crate::domain::{ErrorCode, LOCKOUT_MINUTES, ManagerAccount, ManagerId};
    use chrono::Duration;
    use rstest::rstest;

    fn account(attempts: u32, locked_for: Option<Duration>) -> ManagerAccount {
        ManagerAccount {
            id: ManagerId::new(7),
            username: "admin".into(),
            password_hash: "stored-hash".into(),
            email: "admin@techhive.example".into(),
            full_name: "System Administrator".into(),
            login_attempts: attempts,
            account_locked: locked_for.is_some(),
            locked_until: locked_for.map(|delta| fixture_now() + delta),
            last_login: None,
            created_date: fixture_now() - Duration::days(30),
        }
    }

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("admin", password).expect("valid credentials")
    }

    fn hasher_answering(matches: bool) -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .withf(|_, hash| hash == "stored-hash")
            .times(1)
            .returning(move |_, _| Ok(matches));
        hasher
    }

    fn service(
        repo: MockManagerRepository,
        hasher: MockPasswordHasher,
    ) -> ManagerLoginService<MockManagerRepository, MockPasswordHasher> {
        ManagerLoginService::new(Arc::new(repo), Arc::new(hasher), fixture_clock())
    }

    #[rstest]
    #[tokio::test]
    async fn correct_password_resets_counter_and_stamps_login() {
        let mut repo = MockManagerRepository::new();
        repo.expect_find_by_username()
            .withf(|username| username == "admin")
            .returning(|_| Ok(Some(account(2, None))));
        repo.expect_record_successful_login()
            .withf(|id, at| *id == ManagerId::new(7) && *at == fixture_now())
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_record_failed_attempt().never();

        let outcome = service(repo, hasher_answering(true))
            .attempt_login(&credentials("Admin@123"))
            .await
            .expect("login succeeds");

        let LoginOutcome::Success(identity) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.full_name, "System Administrator");
    }

    #[rstest]
    #[case(0, 1, 2)]
    #[case(1, 2, 1)]
    #[tokio::test]
    async fn wrong_password_counts_down(
        #[case] before: u32,
        #[case] after: u32,
        #[case] remaining: u32,
    ) {
        let mut repo = MockManagerRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(account(before, None))));
        repo.expect_record_failed_attempt()
            .times(1)
            .returning(move |_| Ok(after));
        repo.expect_lock_until().never();

        let outcome = service(repo, hasher_answering(false))
            .attempt_login(&credentials("wrong"))
            .await
            .expect("outcome");

        assert_eq!(
            outcome,
            LoginOutcome::InvalidCredentials {
                attempts_remaining: remaining
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn third_failure_locks_for_the_full_window() {
        let mut repo = MockManagerRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(account(2, None))));
        repo.expect_record_failed_attempt().returning(|_| Ok(3));
        repo.expect_lock_until()
            .withf(|_, until| *until == fixture_now() + Duration::minutes(LOCKOUT_MINUTES))
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = service(repo, hasher_answering(false))
            .attempt_login(&credentials("wrong"))
            .await
            .expect("outcome");

        assert_eq!(
            outcome,
            LoginOutcome::AccountLocked {
                minutes_remaining: 30
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn active_lock_short_circuits_before_password_check() {
        let mut repo = MockManagerRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(account(3, Some(Duration::seconds(601))))));
        repo.expect_record_failed_attempt().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().never();

        let outcome = service(repo, hasher)
            .attempt_login(&credentials("Admin@123"))
            .await
            .expect("outcome");

        assert_eq!(
            outcome,
            LoginOutcome::AccountLocked {
                minutes_remaining: 11
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn expired_lock_is_cleared_before_verifying() {
        let mut repo = MockManagerRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(account(3, Some(Duration::minutes(-1))))));
        repo.expect_clear_lock()
            .withf(|id| *id == ManagerId::new(7))
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_record_successful_login()
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = service(repo, hasher_answering(true))
            .attempt_login(&credentials("Admin@123"))
            .await
            .expect("outcome");

        assert!(matches!(outcome, LoginOutcome::Success(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_is_reported_generically() {
        let mut repo = MockManagerRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().never();

        let outcome = service(repo, hasher)
            .attempt_login(&credentials("whatever"))
            .await
            .expect("outcome");

        assert_eq!(
            outcome,
            LoginOutcome::InvalidCredentials {
                attempts_remaining: MAX_LOGIN_ATTEMPTS
            }
        );
    }

    #[rstest]
    #[case(ManagerRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ManagerRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn store_failures_surface_as_errors(
        #[case] failure: ManagerRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockManagerRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Err(failure.clone()));

        let err = service(repo, MockPasswordHasher::new())
            .attempt_login(&credentials("x"))
            .await
            .expect_err("store failure");

        assert_eq!(err.code(), expected);
    }
}
