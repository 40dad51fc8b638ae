//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie holds the signed-in manager's identity and, between a
//! dashboard action and the redirect that follows it, a one-shot flash
//! message.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, ManagerIdentity};

pub(crate) const MANAGER_KEY: &str = "manager";
pub(crate) const FLASH_KEY: &str = "flash";

/// Newtype wrapper exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `manager`.
    ///
    /// The session id is renewed so a cookie captured before login cannot be
    /// reused afterwards.
    pub fn sign_in(&self, manager: &ManagerIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(MANAGER_KEY, manager)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in manager, if any.
    ///
    /// A cookie that no longer decodes is treated as signed out.
    pub fn manager(&self) -> Result<Option<ManagerIdentity>, Error> {
        match self.0.get::<ManagerIdentity>(MANAGER_KEY) {
            Ok(manager) => Ok(manager),
            Err(error) => {
                warn!(%error, "discarding unreadable manager session");
                self.0.remove(MANAGER_KEY);
                Ok(None)
            }
        }
    }

    /// Drop everything stored in the session.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// Queue a message for the next page view.
    pub fn set_flash(&self, message: &str) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, message)
            .map_err(|error| Error::internal(format!("failed to persist flash message: {error}")))
    }

    /// Take the queued message, clearing it.
    pub fn take_flash(&self) -> Option<String> {
        self.0.remove_as::<String>(FLASH_KEY).and_then(Result::ok)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
