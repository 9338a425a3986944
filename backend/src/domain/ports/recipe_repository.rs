//! Port for recipe persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::listing::{RecipeFilter, Sort};
use crate::domain::{NewRecipe, Recipe, RecipePatch};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "recipe store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe store query failed: {message}",
    }
}

/// Port for the recipes collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn create(&self, draft: &NewRecipe) -> Result<Recipe, RecipeRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// List matching recipes in the requested order; ties stay in
    /// insertion order.
    async fn list(
        &self,
        filter: &RecipeFilter,
        sort: Sort,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Merge the patch over the stored document; `None` if absent.
    /// `creator_id` is not part of the patch and never changes.
    async fn update(
        &self,
        id: &Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Returns whether a document was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, RecipeRepositoryError>;
}
