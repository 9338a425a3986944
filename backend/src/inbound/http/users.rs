//! User profile handlers.
//!
//! ```text
//! GET    /api/v1/users/me            Fetch the requester's profile
//! PUT    /api/v1/users/{id}          Merge-update a profile; self only
//! DELETE /api/v1/users/{id}          Delete an account; self only
//! GET    /api/v1/users/{id}/recipes  A user's public recipes
//! ```

use actix_web::{delete, get, put, web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::views::RecipeView;
use crate::domain::{User, UserPatch};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;
use crate::inbound::http::ApiResult;

#[derive(Debug, Serialize)]
struct UserResponse {
    message: &'static str,
    user: User,
}

#[derive(Debug, Serialize)]
struct RecipeListResponse {
    count: usize,
    recipes: Vec<RecipeView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserDeletedResponse {
    message: &'static str,
    deleted_user_id: Uuid,
}

#[get("/users/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let user = state.users.current(identity).await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        message: "User retrieved successfully",
        user,
    }))
}

/// Update a profile. The path id is the target; the policy rejects any
/// requester other than that user, so 403 (not 404) answers an attempt on
/// someone else's profile.
#[put("/users/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Json<UserPatch>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let user = state
        .users
        .update(identity, user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        message: "User updated successfully",
        user,
    }))
}

/// Delete an account and close the session; self only. Content the user
/// created is left in place; its references populate as `null` from now on.
#[delete("/users/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let deleted_user_id = state.users.delete(identity, user_id).await?;
    session.clear();
    Ok(HttpResponse::Ok().json(UserDeletedResponse {
        message: "User deleted successfully",
        deleted_user_id,
    }))
}

#[get("/users/{id}/recipes")]
pub async fn public_recipes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_uuid(&path.into_inner(), "id")?;
    let recipes = state.users.public_recipes(user_id).await?;
    Ok(HttpResponse::Ok().json(RecipeListResponse {
        count: recipes.len(),
        recipes,
    }))
}
