//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use serde_json::json;

use crate::domain::{
    CookbookService, RecipeService, ReviewService, UserService, VisibilityPolicy,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::MemoryStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Wire every service over one shared in-memory store.
pub fn test_state() -> HttpState {
    test_state_with_policy(VisibilityPolicy::default())
}

pub fn test_state_with_policy(policy: VisibilityPolicy) -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::new(
        UserService::new(store.clone(), store.clone(), policy),
        RecipeService::new(store.clone(), store.clone(), store.clone(), policy),
        CookbookService::new(store.clone(), store.clone(), store.clone(), policy),
        ReviewService::new(store.clone(), store.clone(), store, policy),
    )
}

/// Complete a login for a fresh user and return the session cookie plus the
/// created user's id.
pub async fn login_as(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    oauth_id: &str,
    display_name: &str,
) -> (actix_web::cookie::Cookie<'static>, uuid::Uuid) {
    let request = actix_web::test::TestRequest::post()
        .uri("/api/v1/auth/login/complete")
        .set_json(json!({
            "oauthId": oauth_id,
            "displayName": display_name,
        }))
        .to_request();
    let response = actix_web::test::call_service(app, request).await;
    assert!(response.status().is_success());
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    let body: serde_json::Value = actix_web::test::read_body_json(response).await;
    let user_id = body["user"]["id"]
        .as_str()
        .and_then(|raw| uuid::Uuid::parse_str(raw).ok())
        .expect("user id in login response");
    (cookie, user_id)
}
