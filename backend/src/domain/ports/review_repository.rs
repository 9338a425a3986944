//! Port for review persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::listing::{ReviewFilter, Sort};
use crate::domain::{NewReview, Review, ReviewPatch};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "review store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "review store query failed: {message}",
        /// A review by this reviewer for this recipe already exists.
        Duplicate { reviewer_id: Uuid, recipe_id: Uuid } =>
            "duplicate review by {reviewer_id} for recipe {recipe_id}",
    }
}

/// Port for the reviews collection.
///
/// Adapters must enforce (reviewer, recipe) uniqueness atomically within
/// `create`, returning [`ReviewRepositoryError::Duplicate`]; the service's
/// own existence check alone is a racy check-then-act.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, draft: &NewReview) -> Result<Review, ReviewRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Review>, ReviewRepositoryError>;

    /// The unique review for this (reviewer, recipe) pair, if any.
    async fn find_by_reviewer_and_recipe(
        &self,
        reviewer_id: &Uuid,
        recipe_id: &Uuid,
    ) -> Result<Option<Review>, ReviewRepositoryError>;

    async fn list(
        &self,
        filter: &ReviewFilter,
        sort: Sort,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Merge the patch over the stored document; `None` if absent.
    /// `reviewer_id` and `recipe_id` are not part of the patch.
    async fn update(
        &self,
        id: &Uuid,
        patch: &ReviewPatch,
    ) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Returns whether a document was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, ReviewRepositoryError>;

    /// Remove every review targeting the recipe; returns the count. Used by
    /// the recipe cascade delete (dependents first, then the parent).
    async fn delete_by_recipe(&self, recipe_id: &Uuid) -> Result<u64, ReviewRepositoryError>;
}
