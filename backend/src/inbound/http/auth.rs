//! Authentication handlers.
//!
//! ```text
//! POST /api/v1/auth/login/complete  Upsert the user after OAuth and open a session
//! POST /api/v1/auth/logout          Clear the session
//! GET  /api/v1/auth/status          Report the current session's user
//! ```
//!
//! The OAuth handshake itself happens at the identity provider; this adapter
//! only receives the verified profile and binds the resulting user id to the
//! session cookie.

use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;

use crate::domain::{Identity, OauthProfile, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

#[derive(Debug, Serialize)]
struct LoginResponse {
    message: &'static str,
    user: User,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

/// Complete a login with the verified provider profile.
#[post("/auth/login/complete")]
pub async fn login_complete(
    state: web::Data<HttpState>,
    session: SessionContext,
    profile: web::Json<OauthProfile>,
) -> ApiResult<HttpResponse> {
    let user = state.users.login(profile.into_inner()).await?;
    session.persist_user(user.id)?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        user,
    }))
}

/// Clear the session. Succeeds whether or not one was open.
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Logout successful",
    }))
}

/// Report whether the request carries a live session. A session whose user
/// has since been deleted is cleared and reported as unauthenticated.
#[get("/auth/status")]
pub async fn status(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    if matches!(identity, Identity::Anonymous) {
        return Ok(HttpResponse::Ok().json(StatusResponse {
            authenticated: false,
            user: None,
        }));
    }
    match state.users.current(identity).await {
        Ok(user) => Ok(HttpResponse::Ok().json(StatusResponse {
            authenticated: true,
            user: Some(user),
        })),
        Err(error) if error.code() == crate::domain::ErrorCode::NotFound => {
            session.clear();
            Ok(HttpResponse::Ok().json(StatusResponse {
                authenticated: false,
                user: None,
            }))
        }
        Err(error) => Err(error),
    }
}
