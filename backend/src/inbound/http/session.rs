//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal only with the domain
//! [`Identity`]. There is no fallback identity: a request without a valid
//! session resolves to [`Identity::Anonymous`] and the domain layer decides
//! whether that is acceptable for the operation.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::domain::{Error, Identity};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: Uuid) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The requester's identity. A tampered or unparseable user id is
    /// treated as an anonymous request, not an error.
    pub fn identity(&self) -> Result<Identity, Error> {
        match self.0.get::<Uuid>(USER_ID_KEY) {
            Ok(Some(id)) => Ok(Identity::User(id)),
            Ok(None) => Ok(Identity::Anonymous),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                Ok(Identity::Anonymous)
            }
        }
    }

    /// Clear the session, logging the user out.
    pub fn clear(&self) {
        self.0.purge();
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
