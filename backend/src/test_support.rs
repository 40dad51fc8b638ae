//! Helpers shared by unit tests and the `tests/` suites.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use mockable::{Clock, DefaultClock};

use crate::domain::{
    EoiDashboardService, EoiIntakeService, JobBoardService, ManagerLoginService,
    ManagerRegistrationService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryEoiRepository, InMemoryJobRepository, InMemoryManagerRepository, SeedError,
    seed_demo_admin, seeded_job_postings,
};
use crate::outbound::security::BcryptPasswordHasher;

/// Lowest bcrypt cost; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

/// In-memory state with the seeded postings and the demo manager.
///
/// The EOI store is returned alongside so tests can inspect what was
/// written.
///
/// # Errors
///
/// Returns [`SeedError`] if the demo manager cannot be hashed or stored.
pub async fn memory_http_state() -> Result<(HttpState, Arc<InMemoryEoiRepository>), SeedError> {
    let hasher = Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST));
    let managers = Arc::new(InMemoryManagerRepository::new());
    seed_demo_admin(managers.as_ref(), hasher.as_ref()).await?;
    let eois = Arc::new(InMemoryEoiRepository::new());
    let jobs = Arc::new(InMemoryJobRepository::new(seeded_job_postings()));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let state = HttpState {
        login: Arc::new(ManagerLoginService::new(
            managers.clone(),
            hasher.clone(),
            clock.clone(),
        )),
        registration: Arc::new(ManagerRegistrationService::new(managers, hasher)),
        intake: Arc::new(EoiIntakeService::new(eois.clone(), clock)),
        dashboard: Arc::new(EoiDashboardService::new(eois.clone())),
        jobs: Arc::new(JobBoardService::new(jobs)),
    };
    Ok((state, eois))
}

/// Form body of an application that passes every rule.
///
/// # Examples
/// ```
/// use careers::test_support::application_payload;
///
/// assert!(application_payload("TVFED01", "Ana").starts_with("job_reference=TVFED01"));
/// ```
pub fn application_payload(job_reference: &str, first_name: &str) -> String {
    format!(
        "job_reference={job_reference}&first_name={first_name}&last_name=Nguyen\
         &date_of_birth=15%2F06%2F1990&gender=female&street_address=12+Swanston+St\
         &suburb=Melbourne&state=VIC&postcode=3000&email=ana%40example.com\
         &phone=0412+345+678&skills=html5&skills=git&other_skills=Built+several+sites"
    )
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
