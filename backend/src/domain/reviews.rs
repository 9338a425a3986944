//! Review lifecycle service.
//!
//! Review visibility rides on the target recipe's visibility, so most
//! operations here load the recipe alongside the review before consulting
//! the policy. The aggregate rating is recomputed from the listing on every
//! read; it is never stored.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::listing::{ReviewFilter, Sort};
use crate::domain::ports::{
    RecipeRepository, ReviewRepository, ReviewRepositoryError, UserRepository,
};
use crate::domain::rating::RatingSummary;
use crate::domain::views::ReviewView;
use crate::domain::visibility::{Denial, VisibilityPolicy};
use crate::domain::{store_failure, ApiResult, Error, Identity, NewReview, Review, ReviewPatch};

/// Review fields accepted from a client; reviewer and recipe come from the
/// session and the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub rating: u8,
    pub comment: String,
}

/// A recipe's reviews together with the derived rating aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeReviews {
    pub recipe_id: Uuid,
    pub summary: RatingSummary,
    pub reviews: Vec<ReviewView>,
}

/// Lifecycle operations over reviews.
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    recipes: Arc<dyn RecipeRepository>,
    users: Arc<dyn UserRepository>,
    policy: VisibilityPolicy,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        recipes: Arc<dyn RecipeRepository>,
        users: Arc<dyn UserRepository>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            reviews,
            recipes,
            users,
            policy,
        }
    }

    /// Review a public recipe. One review per (reviewer, recipe): the
    /// pre-check keeps the friendly 409, and the store's uniqueness
    /// guarantee closes the check-then-act race.
    pub async fn create(
        &self,
        requester: Identity,
        recipe_id: Uuid,
        input: ReviewInput,
    ) -> ApiResult<ReviewView> {
        let recipe = self.load_recipe(&recipe_id).await?;
        self.policy.create_review(&recipe, requester)?;
        let reviewer_id = requester
            .user_id()
            .ok_or_else(|| Error::unauthenticated("Authentication required"))?;

        let draft = NewReview {
            reviewer_id,
            recipe_id,
            rating: input.rating,
            comment: input.comment,
        };
        draft.validate()?;

        let existing = self
            .reviews
            .find_by_reviewer_and_recipe(&reviewer_id, &recipe_id)
            .await
            .map_err(|err| store_failure(err, "Failed to create review"))?;
        if existing.is_some() {
            return Err(Error::conflict("You have already reviewed this recipe"));
        }

        let review = self.reviews.create(&draft).await.map_err(|err| match err {
            ReviewRepositoryError::Duplicate { .. } => {
                Error::conflict("You have already reviewed this recipe")
            }
            other => store_failure(other, "Failed to create review"),
        })?;
        self.populate(review).await
    }

    /// All reviews for one recipe, newest first, plus the rating aggregate.
    pub async fn list_for_recipe(
        &self,
        requester: Identity,
        recipe_id: Uuid,
    ) -> ApiResult<RecipeReviews> {
        let recipe = self.load_recipe(&recipe_id).await?;
        self.policy.list_recipe_reviews(&recipe, requester)?;

        let reviews = self
            .reviews
            .list(&ReviewFilter::ByRecipe(recipe_id), Sort::CreatedAtDesc)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve reviews"))?;
        let summary = RatingSummary::aggregate(reviews.iter().map(|review| review.rating));

        let mut views = Vec::with_capacity(reviews.len());
        for review in reviews {
            views.push(self.populate(review).await?);
        }
        Ok(RecipeReviews {
            recipe_id,
            summary,
            reviews: views,
        })
    }

    /// Every review on a public recipe, newest first. Anonymous-accessible.
    pub async fn list_public(&self) -> ApiResult<Vec<ReviewView>> {
        self.list(&ReviewFilter::OnPublicRecipes).await
    }

    /// The requester's own reviews, newest first.
    pub async fn list_mine(&self, requester: Identity) -> ApiResult<Vec<ReviewView>> {
        let user_id = requester
            .user_id()
            .ok_or_else(|| Error::unauthenticated("Authentication required"))?;
        self.list(&ReviewFilter::ByReviewer(user_id)).await
    }

    /// Fetch a single review; visible when the recipe is public or the
    /// requester is the recipe's creator or the review's author.
    pub async fn get(&self, requester: Identity, id: Uuid) -> ApiResult<ReviewView> {
        let review = self.load(&id).await?;
        let recipe = self
            .recipes
            .find_by_id(&review.recipe_id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve review"))?;
        match &recipe {
            Some(recipe) => self.policy.read_review(&review, recipe, requester)?,
            // Orphaned review (cascade interrupted): only its author sees it.
            None => {
                if !requester.is(review.reviewer_id) {
                    return Err(Denial::Forbidden(
                        "Access denied. Cannot view review for private recipe.".to_owned(),
                    )
                    .into());
                }
            }
        }
        self.populate(review).await
    }

    /// Merge the patch over the stored review and persist; author only.
    pub async fn update(
        &self,
        requester: Identity,
        id: Uuid,
        patch: ReviewPatch,
    ) -> ApiResult<ReviewView> {
        let review = self.load(&id).await?;
        self.policy.update_review(&review, requester)?;

        let mut merged = review;
        merged.apply(&patch);
        merged.validate()?;

        let updated = self
            .reviews
            .update(&id, &patch)
            .await
            .map_err(|err| store_failure(err, "Failed to update review"))?
            .ok_or_else(|| Error::not_found("Review not found"))?;
        self.populate(updated).await
    }

    /// Delete a review; author only. Returns the deleted id.
    pub async fn delete(&self, requester: Identity, id: Uuid) -> ApiResult<Uuid> {
        let review = self.load(&id).await?;
        self.policy.delete_review(&review, requester)?;
        self.reviews
            .delete(&id)
            .await
            .map_err(|err| store_failure(err, "Failed to delete review"))?;
        Ok(id)
    }

    async fn load(&self, id: &Uuid) -> ApiResult<Review> {
        self.reviews
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve review"))?
            .ok_or_else(|| Error::not_found("Review not found"))
    }

    async fn load_recipe(&self, id: &Uuid) -> ApiResult<crate::domain::Recipe> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve recipe"))?
            .ok_or_else(|| Error::not_found("Recipe not found"))
    }

    async fn list(&self, filter: &ReviewFilter) -> ApiResult<Vec<ReviewView>> {
        let reviews = self
            .reviews
            .list(filter, Sort::CreatedAtDesc)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve reviews"))?;
        let mut views = Vec::with_capacity(reviews.len());
        for review in reviews {
            views.push(self.populate(review).await?);
        }
        Ok(views)
    }

    /// Join the reviewer and target recipe display fields into the view.
    async fn populate(&self, review: Review) -> ApiResult<ReviewView> {
        let reviewer = self
            .users
            .find_by_id(&review.reviewer_id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve review"))?;
        let recipe = self
            .recipes
            .find_by_id(&review.recipe_id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve review"))?;
        Ok(ReviewView::new(review, reviewer.as_ref(), recipe.as_ref()))
    }
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
