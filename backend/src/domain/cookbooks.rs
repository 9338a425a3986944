//! Cookbook lifecycle service.
//!
//! Cookbooks are personal collections: every operation requires a session
//! and, unless the deployment opts into public cookbook reads, only the
//! owner ever sees one. The recipe id list is replaced wholesale on update
//! and resolved into summaries when building a response.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::listing::{CookbookFilter, Sort};
use crate::domain::ports::{CookbookRepository, RecipeRepository, UserRepository};
use crate::domain::views::{CookbookView, RecipeSummary};
use crate::domain::visibility::VisibilityPolicy;
use crate::domain::{
    store_failure, ApiResult, Cookbook, CookbookPatch, Error, Identity, NewCookbook,
};

/// Cookbook fields accepted from a client; the owner comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookInput {
    pub name: String,
    pub description: Option<String>,
    pub recipe_ids: Vec<Uuid>,
}

/// Lifecycle operations over cookbooks.
#[derive(Clone)]
pub struct CookbookService {
    cookbooks: Arc<dyn CookbookRepository>,
    recipes: Arc<dyn RecipeRepository>,
    users: Arc<dyn UserRepository>,
    policy: VisibilityPolicy,
}

impl CookbookService {
    pub fn new(
        cookbooks: Arc<dyn CookbookRepository>,
        recipes: Arc<dyn RecipeRepository>,
        users: Arc<dyn UserRepository>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            cookbooks,
            recipes,
            users,
            policy,
        }
    }

    /// Create a cookbook owned by the authenticated requester. Referenced
    /// recipe ids are stored as given; dangling ids simply resolve to
    /// nothing when the cookbook is read back.
    pub async fn create(&self, requester: Identity, input: CookbookInput) -> ApiResult<CookbookView> {
        let owner_id = requester
            .user_id()
            .ok_or_else(|| Error::unauthenticated("Authentication required"))?;
        let draft = NewCookbook {
            owner_id,
            name: input.name,
            description: input.description,
            recipe_ids: input.recipe_ids,
        };
        draft.validate()?;

        let cookbook = self
            .cookbooks
            .create(&draft)
            .await
            .map_err(|err| store_failure(err, "Failed to create cookbook"))?;
        self.populate(cookbook).await
    }

    /// Fetch a single cookbook, honouring the read policy.
    pub async fn get(&self, requester: Identity, id: Uuid) -> ApiResult<CookbookView> {
        let cookbook = self.load(&id).await?;
        self.policy.read_cookbook(&cookbook, requester)?;
        self.populate(cookbook).await
    }

    /// The requester's own cookbooks, newest first.
    pub async fn list_mine(&self, requester: Identity) -> ApiResult<Vec<CookbookView>> {
        let owner_id = requester
            .user_id()
            .ok_or_else(|| Error::unauthenticated("Authentication required"))?;
        let cookbooks = self
            .cookbooks
            .list(&CookbookFilter::owned_by(owner_id), Sort::CreatedAtDesc)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve cookbooks"))?;

        let mut views = Vec::with_capacity(cookbooks.len());
        for cookbook in cookbooks {
            views.push(self.populate(cookbook).await?);
        }
        Ok(views)
    }

    /// Merge the patch over the stored cookbook and persist; owner only.
    pub async fn update(
        &self,
        requester: Identity,
        id: Uuid,
        patch: CookbookPatch,
    ) -> ApiResult<CookbookView> {
        let cookbook = self.load(&id).await?;
        self.policy.update_cookbook(&cookbook, requester)?;

        let mut merged = cookbook;
        merged.apply(&patch);
        merged.validate()?;

        let updated = self
            .cookbooks
            .update(&id, &patch)
            .await
            .map_err(|err| store_failure(err, "Failed to update cookbook"))?
            .ok_or_else(|| Error::not_found("Cookbook not found"))?;
        self.populate(updated).await
    }

    /// Delete a cookbook; owner only. Returns the deleted id. Recipes
    /// referenced by the cookbook are untouched.
    pub async fn delete(&self, requester: Identity, id: Uuid) -> ApiResult<Uuid> {
        let cookbook = self.load(&id).await?;
        self.policy.delete_cookbook(&cookbook, requester)?;
        self.cookbooks
            .delete(&id)
            .await
            .map_err(|err| store_failure(err, "Failed to delete cookbook"))?;
        Ok(id)
    }

    async fn load(&self, id: &Uuid) -> ApiResult<Cookbook> {
        self.cookbooks
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve cookbook"))?
            .ok_or_else(|| Error::not_found("Cookbook not found"))
    }

    /// Join the owner's display fields and resolve the recipe id list into
    /// ordered summaries, dropping ids whose recipe no longer exists.
    async fn populate(&self, cookbook: Cookbook) -> ApiResult<CookbookView> {
        let owner = self
            .users
            .find_by_id(&cookbook.owner_id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve cookbook"))?;

        let mut summaries = Vec::with_capacity(cookbook.recipe_ids.len());
        for recipe_id in &cookbook.recipe_ids {
            let found = self
                .recipes
                .find_by_id(recipe_id)
                .await
                .map_err(|err| store_failure(err, "Failed to retrieve cookbook"))?;
            if let Some(recipe) = found {
                summaries.push(RecipeSummary::from(&recipe));
            }
        }
        Ok(CookbookView::new(cookbook, owner.as_ref(), summaries))
    }
}

#[cfg(test)]
#[path = "cookbooks_tests.rs"]
mod tests;
