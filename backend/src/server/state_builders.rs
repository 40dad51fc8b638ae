//! Builders wiring repositories into the driving ports handlers use.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use careers::domain::ports::{EoiRepository, JobRepository, ManagerRepository};
use careers::domain::{
    EoiDashboardService, EoiIntakeService, JobBoardService, ManagerLoginService,
    ManagerRegistrationService,
};
use careers::inbound::http::state::HttpState;
use careers::outbound::memory::{
    DEMO_ADMIN_USERNAME, InMemoryEoiRepository, InMemoryJobRepository, InMemoryManagerRepository,
    SeedError, seed_demo_admin, seeded_job_postings,
};
use careers::outbound::persistence::{
    DbPool, DieselEoiRepository, DieselJobRepository, DieselManagerRepository,
};
use careers::outbound::security::BcryptPasswordHasher;

use super::ServerConfig;

/// Repositories backing one running server.
struct Repositories<J, E, M> {
    jobs: Arc<J>,
    eois: Arc<E>,
    managers: Arc<M>,
}

fn assemble<J, E, M>(
    repos: Repositories<J, E, M>,
    hasher: Arc<BcryptPasswordHasher>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    J: JobRepository + 'static,
    E: EoiRepository + 'static,
    M: ManagerRepository + 'static,
{
    let Repositories {
        jobs,
        eois,
        managers,
    } = repos;
    HttpState {
        login: Arc::new(ManagerLoginService::new(
            managers.clone(),
            hasher.clone(),
            clock.clone(),
        )),
        registration: Arc::new(ManagerRegistrationService::new(managers, hasher)),
        intake: Arc::new(EoiIntakeService::new(eois.clone(), clock)),
        dashboard: Arc::new(EoiDashboardService::new(eois)),
        jobs: Arc::new(JobBoardService::new(jobs)),
    }
}

fn diesel_state(pool: &DbPool, hasher: Arc<BcryptPasswordHasher>, clock: Arc<dyn Clock>) -> HttpState {
    assemble(
        Repositories {
            jobs: Arc::new(DieselJobRepository::new(pool.clone())),
            eois: Arc::new(DieselEoiRepository::new(pool.clone())),
            managers: Arc::new(DieselManagerRepository::new(pool.clone())),
        },
        hasher,
        clock,
    )
}

async fn memory_state(
    hasher: Arc<BcryptPasswordHasher>,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, SeedError> {
    let managers = Arc::new(InMemoryManagerRepository::new());
    seed_demo_admin(managers.as_ref(), hasher.as_ref()).await?;
    warn!(
        username = DEMO_ADMIN_USERNAME,
        "no database configured; serving in-memory fixtures with a demo manager account"
    );
    Ok(assemble(
        Repositories {
            jobs: Arc::new(InMemoryJobRepository::new(seeded_job_postings())),
            eois: Arc::new(InMemoryEoiRepository::new()),
            managers,
        },
        hasher,
        clock,
    ))
}

/// Build handler state: PostgreSQL repositories when a pool is configured,
/// otherwise seeded in-memory ones.
///
/// # Errors
///
/// Returns [`SeedError`] when the demo manager cannot be created.
pub async fn build_http_state(config: &ServerConfig) -> Result<web::Data<HttpState>, SeedError> {
    let hasher = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_state(pool, hasher, clock)
        }
        None => memory_state(hasher, clock).await?,
    };
    Ok(web::Data::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use careers::domain::LoginCredentials;
    use careers::domain::LoginOutcome;
    use careers::inbound::http::session_config::SessionSettings;
    use careers::outbound::memory::{DEMO_ADMIN_FULL_NAME, DEMO_ADMIN_PASSWORD};
    use actix_web::cookie::{Key, SameSite};

    fn memory_config() -> ServerConfig {
        ServerConfig::new(
            SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            "127.0.0.1:0".parse().expect("socket address"),
        )
        .with_bcrypt_cost(4)
    }

    #[tokio::test]
    async fn memory_state_accepts_demo_admin() {
        let state = build_http_state(&memory_config()).await.expect("state builds");
        let credentials = LoginCredentials::try_from_parts(DEMO_ADMIN_USERNAME, DEMO_ADMIN_PASSWORD)
            .expect("credentials");

        let outcome = state.login.attempt_login(&credentials).await.expect("login runs");

        match outcome {
            LoginOutcome::Success(identity) => assert_eq!(identity.full_name, DEMO_ADMIN_FULL_NAME),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn memory_state_lists_seeded_jobs() {
        let state = build_http_state(&memory_config()).await.expect("state builds");

        let choices = state.jobs.application_choices().await.expect("jobs listed");

        let references: Vec<_> = choices.iter().map(|job| job.reference.as_str()).collect();
        assert_eq!(references.len(), 2);
        assert!(references.contains(&"TVFED01"));
    }
}
