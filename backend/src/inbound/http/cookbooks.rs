//! Cookbook handlers.
//!
//! ```text
//! POST   /api/v1/cookbooks        Create a cookbook (session required)
//! GET    /api/v1/cookbooks        List the requester's cookbooks
//! GET    /api/v1/cookbooks/{id}   Fetch one cookbook per the read policy
//! PUT    /api/v1/cookbooks/{id}   Merge-update; owner only
//! DELETE /api/v1/cookbooks/{id}   Delete; owner only
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cookbooks::CookbookInput;
use crate::domain::views::CookbookView;
use crate::domain::CookbookPatch;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;
use crate::inbound::http::ApiResult;

/// Cookbook creation body. The owner is taken from the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookbookRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipe_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
struct CookbookResponse {
    message: &'static str,
    cookbook: CookbookView,
}

#[derive(Debug, Serialize)]
struct CookbookListResponse {
    count: usize,
    cookbooks: Vec<CookbookView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CookbookDeletedResponse {
    message: &'static str,
    deleted_cookbook_id: Uuid,
}

#[post("/cookbooks")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<CookbookRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let body = body.into_inner();
    let cookbook = state
        .cookbooks
        .create(
            identity,
            CookbookInput {
                name: body.name,
                description: body.description,
                recipe_ids: body.recipe_ids,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(CookbookResponse {
        message: "Cookbook created successfully",
        cookbook,
    }))
}

#[get("/cookbooks")]
pub async fn list_mine(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let cookbooks = state.cookbooks.list_mine(identity).await?;
    Ok(HttpResponse::Ok().json(CookbookListResponse {
        count: cookbooks.len(),
        cookbooks,
    }))
}

#[get("/cookbooks/{id}")]
pub async fn get(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let cookbook = state.cookbooks.get(identity, id).await?;
    Ok(HttpResponse::Ok().json(CookbookResponse {
        message: "Cookbook retrieved successfully",
        cookbook,
    }))
}

#[put("/cookbooks/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Json<CookbookPatch>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let cookbook = state
        .cookbooks
        .update(identity, id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(CookbookResponse {
        message: "Cookbook updated successfully",
        cookbook,
    }))
}

#[delete("/cookbooks/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let deleted_cookbook_id = state.cookbooks.delete(identity, id).await?;
    Ok(HttpResponse::Ok().json(CookbookDeletedResponse {
        message: "Cookbook deleted successfully",
        deleted_cookbook_id,
    }))
}
