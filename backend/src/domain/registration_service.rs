//! Manager registration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::login_service::{map_hash_error, map_manager_error};
use crate::domain::ports::{ManagerRegistration, ManagerRepository, PasswordHasher};
use crate::domain::{
    Error, ErrorCode, NewManager, RegistrationForm, RegistrationReceipt, validate_registration,
};

/// Message used when the username or email is already taken.
pub const DUPLICATE_MANAGER_MESSAGE: &str = "Username or email already exists.";

/// Registration service implementing [`ManagerRegistration`].
#[derive(Clone)]
pub struct ManagerRegistrationService<R, H> {
    managers: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> ManagerRegistrationService<R, H> {
    /// Create a registration service.
    pub fn new(managers: Arc<R>, hasher: Arc<H>) -> Self {
        Self { managers, hasher }
    }
}

fn duplicate(form: &RegistrationForm) -> Error {
    Error::conflict(DUPLICATE_MANAGER_MESSAGE).with_details(serde_json::json!({
        "errors": [{ "field": "username", "message": DUPLICATE_MANAGER_MESSAGE }],
        "values": form.redisplay_values(),
    }))
}

#[async_trait]
impl<R, H> ManagerRegistration for ManagerRegistrationService<R, H>
where
    R: ManagerRepository,
    H: PasswordHasher,
{
    async fn register(&self, form: &RegistrationForm) -> Result<RegistrationReceipt, Error> {
        let valid = validate_registration(form)
            .map_err(|errors| errors.into_error(form.redisplay_values()))?;

        let taken = self
            .managers
            .exists_with_username_or_email(&valid.username, &valid.email)
            .await
            .map_err(map_manager_error)?;
        if taken {
            warn!(username = %valid.username, "registration rejected: duplicate manager");
            return Err(duplicate(form));
        }

        let password_hash = self
            .hasher
            .hash(valid.password.as_str())
            .await
            .map_err(map_hash_error)?;

        let new_manager = NewManager {
            username: valid.username.clone(),
            password_hash,
            email: valid.email,
            full_name: valid.full_name,
        };
        let id = self
            .managers
            .create(&new_manager)
            .await
            // A concurrent registration can still win the unique index.
            .map_err(|err| match map_manager_error(err) {
                conflict if conflict.code() == ErrorCode::Conflict => duplicate(form),
                other => other,
            })?;

        info!(username = %valid.username, manager_id = %id, "manager registered");
        Ok(RegistrationReceipt {
            username: valid.username,
            message: "Account created successfully. You can now log in.".to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{ManagerRepositoryError, MockManagerRepository, MockPasswordHasher};
    use crate::domain::ManagerId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "hr_lead".into(),
            password: "Str0ng!pass".into(),
            confirm_password: "Str0ng!pass".into(),
            email: "lead@techhive.example".into(),
            full_name: "Harriet Lead".into(),
        }
    }

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password == "Str0ng!pass")
            .returning(|_| Ok("$2b$12$hashed".to_owned()));
        hasher
    }

    #[rstest]
    #[tokio::test]
    async fn stores_hashed_password(form: RegistrationForm) {
        let mut repo = MockManagerRepository::new();
        repo.expect_exists_with_username_or_email()
            .withf(|username, email| username == "hr_lead" && email == "lead@techhive.example")
            .returning(|_, _| Ok(false));
        repo.expect_create()
            .withf(|manager| manager.password_hash == "$2b$12$hashed")
            .times(1)
            .returning(|_| Ok(ManagerId::new(2)));

        let receipt = ManagerRegistrationService::new(Arc::new(repo), Arc::new(hasher()))
            .register(&form)
            .await
            .expect("registered");

        assert_eq!(receipt.username, "hr_lead");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicates_are_conflicts(form: RegistrationForm) {
        let mut repo = MockManagerRepository::new();
        repo.expect_exists_with_username_or_email()
            .returning(|_, _| Ok(true));
        repo.expect_create().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let err = ManagerRegistrationService::new(Arc::new(repo), Arc::new(hasher))
            .register(&form)
            .await
            .expect_err("duplicate");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), DUPLICATE_MANAGER_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn racing_insert_is_reported_as_duplicate(form: RegistrationForm) {
        let mut repo = MockManagerRepository::new();
        repo.expect_exists_with_username_or_email()
            .returning(|_, _| Ok(false));
        repo.expect_create()
            .returning(|_| Err(ManagerRepositoryError::conflict("managers_username_key")));

        let err = ManagerRegistrationService::new(Arc::new(repo), Arc::new(hasher()))
            .register(&form)
            .await
            .expect_err("duplicate");

        assert_eq!(err.message(), DUPLICATE_MANAGER_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_forms_never_reach_the_store(mut form: RegistrationForm) {
        form.email = "not-an-email".into();
        let mut repo = MockManagerRepository::new();
        repo.expect_exists_with_username_or_email().never();

        let err = ManagerRegistrationService::new(Arc::new(repo), Arc::new(MockPasswordHasher::new()))
            .register(&form)
            .await
            .expect_err("invalid");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["errors"][0]["message"], "Invalid email format.");
        assert_eq!(details["values"]["email"], "not-an-email");
    }
}
