//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{EoiDashboard, EoiIntake, JobBoard, LoginService, ManagerRegistration};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use careers::domain::{
///     EoiDashboardService, EoiIntakeService, JobBoardService, ManagerLoginService,
///     ManagerRegistrationService,
/// };
/// use careers::inbound::http::state::HttpState;
/// use careers::outbound::memory::{
///     InMemoryEoiRepository, InMemoryJobRepository, InMemoryManagerRepository,
///     seeded_job_postings,
/// };
/// use careers::outbound::security::BcryptPasswordHasher;
/// use mockable::DefaultClock;
///
/// let managers = Arc::new(InMemoryManagerRepository::new());
/// let hasher = Arc::new(BcryptPasswordHasher::default());
/// let eois = Arc::new(InMemoryEoiRepository::new());
/// let clock = Arc::new(DefaultClock);
/// let state = HttpState {
///     login: Arc::new(ManagerLoginService::new(managers.clone(), hasher.clone(), clock.clone())),
///     registration: Arc::new(ManagerRegistrationService::new(managers, hasher)),
///     intake: Arc::new(EoiIntakeService::new(eois.clone(), clock)),
///     dashboard: Arc::new(EoiDashboardService::new(eois)),
///     jobs: Arc::new(JobBoardService::new(Arc::new(InMemoryJobRepository::new(
///         seeded_job_postings(),
///     )))),
/// };
/// let _jobs = state.jobs.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn ManagerRegistration>,
    pub intake: Arc<dyn EoiIntake>,
    pub dashboard: Arc<dyn EoiDashboard>,
    pub jobs: Arc<dyn JobBoard>,
}
