//! Recipe lifecycle service.
//!
//! Orchestrates the visibility policy, ownership-scoped filters, and the
//! review cascade around the recipe store. Every decision is made against
//! the freshly loaded document, never against client-supplied state.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::listing::{RecipeFilter, Sort};
use crate::domain::ports::{RecipeRepository, ReviewRepository, UserRepository};
use crate::domain::views::RecipeView;
use crate::domain::visibility::VisibilityPolicy;
use crate::domain::{store_failure, ApiResult, Error, Identity, NewRecipe, Recipe, RecipePatch};

/// Recipe fields accepted from a client. The creator id is deliberately
/// absent: it always comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeInput {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<crate::domain::Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub is_public: bool,
    pub tags: Vec<String>,
}

/// Lifecycle operations over recipes.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    reviews: Arc<dyn ReviewRepository>,
    users: Arc<dyn UserRepository>,
    policy: VisibilityPolicy,
}

impl RecipeService {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        reviews: Arc<dyn ReviewRepository>,
        users: Arc<dyn UserRepository>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            recipes,
            reviews,
            users,
            policy,
        }
    }

    /// Create a recipe owned by the authenticated requester.
    pub async fn create(&self, requester: Identity, input: RecipeInput) -> ApiResult<RecipeView> {
        let creator_id = requester
            .user_id()
            .ok_or_else(|| Error::unauthenticated("Authentication required"))?;
        let draft = NewRecipe {
            creator_id,
            title: input.title,
            description: input.description,
            ingredients: input.ingredients,
            instructions: input.instructions,
            prep_time_minutes: input.prep_time_minutes,
            cook_time_minutes: input.cook_time_minutes,
            servings: input.servings,
            is_public: input.is_public,
            tags: input.tags,
        };
        draft.validate()?;

        let recipe = self
            .recipes
            .create(&draft)
            .await
            .map_err(|err| store_failure(err, "Failed to create recipe"))?;
        self.populate(recipe).await
    }

    /// Fetch a single recipe, honouring the visibility rules.
    pub async fn get(&self, requester: Identity, id: Uuid) -> ApiResult<RecipeView> {
        let recipe = self.load(&id).await?;
        self.policy.read_recipe(&recipe, requester)?;
        self.populate(recipe).await
    }

    /// All public recipes, newest first.
    pub async fn list_public(&self) -> ApiResult<Vec<RecipeView>> {
        self.list(&RecipeFilter::public()).await
    }

    /// Everything the requester created, private recipes included.
    pub async fn list_mine(&self, requester: Identity) -> ApiResult<Vec<RecipeView>> {
        let user_id = requester
            .user_id()
            .ok_or_else(|| Error::unauthenticated("Authentication required"))?;
        self.list(&RecipeFilter::owned_by(user_id)).await
    }

    /// Merge the patch over the stored recipe and persist; creator only.
    pub async fn update(
        &self,
        requester: Identity,
        id: Uuid,
        patch: RecipePatch,
    ) -> ApiResult<RecipeView> {
        let recipe = self.load(&id).await?;
        self.policy.update_recipe(&recipe, requester)?;

        let mut merged = recipe;
        merged.apply(&patch);
        merged.validate()?;

        let updated = self
            .recipes
            .update(&id, &patch)
            .await
            .map_err(|err| store_failure(err, "Failed to update recipe"))?
            .ok_or_else(|| Error::not_found("Recipe not found"))?;
        self.populate(updated).await
    }

    /// Delete a recipe and every review that targets it.
    ///
    /// The cascade runs dependents-first as two sequential store calls with
    /// no transaction around them; a crash in between leaves the recipe in
    /// place with its reviews already gone.
    pub async fn delete(&self, requester: Identity, id: Uuid) -> ApiResult<Uuid> {
        let recipe = self.load(&id).await?;
        self.policy.delete_recipe(&recipe, requester)?;

        self.reviews
            .delete_by_recipe(&id)
            .await
            .map_err(|err| store_failure(err, "Failed to delete recipe"))?;
        self.recipes
            .delete(&id)
            .await
            .map_err(|err| store_failure(err, "Failed to delete recipe"))?;
        Ok(id)
    }

    async fn load(&self, id: &Uuid) -> ApiResult<Recipe> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve recipe"))?
            .ok_or_else(|| Error::not_found("Recipe not found"))
    }

    async fn list(&self, filter: &RecipeFilter) -> ApiResult<Vec<RecipeView>> {
        let recipes = self
            .recipes
            .list(filter, Sort::CreatedAtDesc)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve recipes"))?;

        let mut views = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            views.push(self.populate(recipe).await?);
        }
        Ok(views)
    }

    /// Join the creator's display fields into the response view.
    async fn populate(&self, recipe: Recipe) -> ApiResult<RecipeView> {
        let creator = self
            .users
            .find_by_id(&recipe.creator_id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve recipe"))?;
        Ok(RecipeView::new(recipe, creator.as_ref()))
    }
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
