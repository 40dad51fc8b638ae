//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;
use std::sync::Arc;

use crate::domain::ports::{
    MockEoiDashboard, MockEoiIntake, MockJobBoard, MockLoginService, MockManagerRegistration,
};
use crate::inbound::http::state::HttpState;

/// Session middleware with a fresh key and the `Secure` flag off so cookies
/// survive plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    crate::test_support::session_cookie(res).expect("session cookie set")
}

/// Mocked driving ports; set expectations on the fields you need.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockManagerRegistration,
    pub intake: MockEoiIntake,
    pub dashboard: MockEoiDashboard,
    pub jobs: MockJobBoard,
}

impl MockPorts {
    /// Bundle the mocks as handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            intake: Arc::new(self.intake),
            dashboard: Arc::new(self.dashboard),
            jobs: Arc::new(self.jobs),
        })
    }
}
