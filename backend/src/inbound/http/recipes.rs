//! Recipe handlers.
//!
//! ```text
//! POST   /api/v1/recipes        Create a recipe (session required)
//! GET    /api/v1/recipes        List public recipes, newest first
//! GET    /api/v1/recipes/mine   List the requester's recipes (session required)
//! GET    /api/v1/recipes/{id}   Fetch one recipe per visibility rules
//! PUT    /api/v1/recipes/{id}   Merge-update; creator only
//! DELETE /api/v1/recipes/{id}   Delete with review cascade; creator only
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::recipes::RecipeInput;
use crate::domain::views::RecipeView;
use crate::domain::{Ingredient, RecipePatch};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;
use crate::inbound::http::ApiResult;

/// Recipe creation body. The creator is taken from the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub cook_time_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<RecipeRequest> for RecipeInput {
    fn from(request: RecipeRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            ingredients: request.ingredients,
            instructions: request.instructions,
            prep_time_minutes: request.prep_time_minutes,
            cook_time_minutes: request.cook_time_minutes,
            servings: request.servings,
            is_public: request.is_public,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Serialize)]
struct RecipeResponse {
    message: &'static str,
    recipe: RecipeView,
}

#[derive(Debug, Serialize)]
struct RecipeListResponse {
    count: usize,
    recipes: Vec<RecipeView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDeletedResponse {
    message: &'static str,
    deleted_recipe_id: Uuid,
}

#[post("/recipes")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let recipe = state
        .recipes
        .create(identity, body.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RecipeResponse {
        message: "Recipe created successfully",
        recipe,
    }))
}

#[get("/recipes")]
pub async fn list_public(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let recipes = state.recipes.list_public().await?;
    Ok(HttpResponse::Ok().json(RecipeListResponse {
        count: recipes.len(),
        recipes,
    }))
}

#[get("/recipes/mine")]
pub async fn list_mine(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let recipes = state.recipes.list_mine(identity).await?;
    Ok(HttpResponse::Ok().json(RecipeListResponse {
        count: recipes.len(),
        recipes,
    }))
}

#[get("/recipes/{id}")]
pub async fn get(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let recipe = state.recipes.get(identity, id).await?;
    Ok(HttpResponse::Ok().json(RecipeResponse {
        message: "Recipe retrieved successfully",
        recipe,
    }))
}

#[put("/recipes/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Json<RecipePatch>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let recipe = state
        .recipes
        .update(identity, id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(RecipeResponse {
        message: "Recipe updated successfully",
        recipe,
    }))
}

#[delete("/recipes/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let deleted_recipe_id = state.recipes.delete(identity, id).await?;
    Ok(HttpResponse::Ok().json(RecipeDeletedResponse {
        message: "Recipe deleted successfully",
        deleted_recipe_id,
    }))
}
