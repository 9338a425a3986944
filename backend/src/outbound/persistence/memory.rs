//! In-memory document store implementing every repository port.
//!
//! Collections live in insertion order behind one `RwLock`, so the stable
//! sort in `list` keeps creation-time ties in insertion order as the ports
//! require. The store assigns ids and timestamps itself; callers never
//! supply either. Review uniqueness is enforced inside the write lock that
//! inserts the document, which makes `create` atomic with respect to
//! concurrent duplicates.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::listing::{CookbookFilter, RecipeFilter, ReviewFilter, Sort};
use crate::domain::ports::{
    CookbookRepository, CookbookRepositoryError, RecipeRepository, RecipeRepositoryError,
    ReviewRepository, ReviewRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Cookbook, CookbookPatch, NewCookbook, NewRecipe, NewReview, OauthProfile, Recipe, RecipePatch,
    Review, ReviewPatch, User, UserPatch,
};

const POISONED: &str = "store lock poisoned";

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    recipes: Vec<Recipe>,
    cookbooks: Vec<Cookbook>,
    reviews: Vec<Review>,
}

/// Process-local entity store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, String> {
        self.inner.read().map_err(|_| POISONED.to_owned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, String> {
        self.inner.write().map_err(|_| POISONED.to_owned())
    }
}

/// Newest first; the sort is stable, so equal timestamps keep their
/// insertion order.
fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>, sort: Sort) {
    match sort {
        Sort::CreatedAtDesc => items.sort_by(|a, b| created_at(b).cmp(&created_at(a))),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, profile: &OauthProfile) -> Result<User, UserRepositoryError> {
        let mut guard = self.write().map_err(UserRepositoryError::query)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            oauth_id: profile.oauth_id.clone(),
            display_name: profile.display_name.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            profile_image_url: profile.profile_image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        guard.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserRepositoryError> {
        let guard = self.read().map_err(UserRepositoryError::query)?;
        Ok(guard.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_oauth_id(
        &self,
        oauth_id: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let guard = self.read().map_err(UserRepositoryError::query)?;
        Ok(guard
            .users
            .iter()
            .find(|user| user.oauth_id == oauth_id)
            .cloned())
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut guard = self.write().map_err(UserRepositoryError::query)?;
        let Some(user) = guard.users.iter_mut().find(|user| user.id == *id) else {
            return Ok(None);
        };
        user.apply(patch);
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, UserRepositoryError> {
        let mut guard = self.write().map_err(UserRepositoryError::query)?;
        let before = guard.users.len();
        guard.users.retain(|user| user.id != *id);
        Ok(guard.users.len() < before)
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn create(&self, draft: &NewRecipe) -> Result<Recipe, RecipeRepositoryError> {
        let mut guard = self.write().map_err(RecipeRepositoryError::query)?;
        let now = Utc::now();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            creator_id: draft.creator_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            ingredients: draft.ingredients.clone(),
            instructions: draft.instructions.clone(),
            prep_time_minutes: draft.prep_time_minutes,
            cook_time_minutes: draft.cook_time_minutes,
            servings: draft.servings,
            is_public: draft.is_public,
            tags: draft.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        guard.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let guard = self.read().map_err(RecipeRepositoryError::query)?;
        Ok(guard.recipes.iter().find(|recipe| recipe.id == *id).cloned())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        sort: Sort,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let guard = self.read().map_err(RecipeRepositoryError::query)?;
        let mut matches: Vec<Recipe> = guard
            .recipes
            .iter()
            .filter(|recipe| {
                filter
                    .creator_id
                    .is_none_or(|creator_id| recipe.creator_id == creator_id)
                    && filter.is_public.is_none_or(|flag| recipe.is_public == flag)
            })
            .cloned()
            .collect();
        newest_first(&mut matches, |recipe| recipe.created_at, sort);
        Ok(matches)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut guard = self.write().map_err(RecipeRepositoryError::query)?;
        let Some(recipe) = guard.recipes.iter_mut().find(|recipe| recipe.id == *id) else {
            return Ok(None);
        };
        recipe.apply(patch);
        recipe.updated_at = Utc::now();
        Ok(Some(recipe.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, RecipeRepositoryError> {
        let mut guard = self.write().map_err(RecipeRepositoryError::query)?;
        let before = guard.recipes.len();
        guard.recipes.retain(|recipe| recipe.id != *id);
        Ok(guard.recipes.len() < before)
    }
}

#[async_trait]
impl CookbookRepository for MemoryStore {
    async fn create(&self, draft: &NewCookbook) -> Result<Cookbook, CookbookRepositoryError> {
        let mut guard = self.write().map_err(CookbookRepositoryError::query)?;
        let now = Utc::now();
        let cookbook = Cookbook {
            id: Uuid::new_v4(),
            owner_id: draft.owner_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            recipe_ids: draft.recipe_ids.clone(),
            created_at: now,
            updated_at: now,
        };
        guard.cookbooks.push(cookbook.clone());
        Ok(cookbook)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Cookbook>, CookbookRepositoryError> {
        let guard = self.read().map_err(CookbookRepositoryError::query)?;
        Ok(guard
            .cookbooks
            .iter()
            .find(|cookbook| cookbook.id == *id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &CookbookFilter,
        sort: Sort,
    ) -> Result<Vec<Cookbook>, CookbookRepositoryError> {
        let guard = self.read().map_err(CookbookRepositoryError::query)?;
        let mut matches: Vec<Cookbook> = guard
            .cookbooks
            .iter()
            .filter(|cookbook| cookbook.owner_id == filter.owner_id)
            .cloned()
            .collect();
        newest_first(&mut matches, |cookbook| cookbook.created_at, sort);
        Ok(matches)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &CookbookPatch,
    ) -> Result<Option<Cookbook>, CookbookRepositoryError> {
        let mut guard = self.write().map_err(CookbookRepositoryError::query)?;
        let Some(cookbook) = guard.cookbooks.iter_mut().find(|cookbook| cookbook.id == *id) else {
            return Ok(None);
        };
        cookbook.apply(patch);
        cookbook.updated_at = Utc::now();
        Ok(Some(cookbook.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, CookbookRepositoryError> {
        let mut guard = self.write().map_err(CookbookRepositoryError::query)?;
        let before = guard.cookbooks.len();
        guard.cookbooks.retain(|cookbook| cookbook.id != *id);
        Ok(guard.cookbooks.len() < before)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, draft: &NewReview) -> Result<Review, ReviewRepositoryError> {
        let mut guard = self.write().map_err(ReviewRepositoryError::query)?;
        // Uniqueness check and insert under the same write lock.
        let duplicate = guard.reviews.iter().any(|review| {
            review.reviewer_id == draft.reviewer_id && review.recipe_id == draft.recipe_id
        });
        if duplicate {
            return Err(ReviewRepositoryError::duplicate(
                draft.reviewer_id,
                draft.recipe_id,
            ));
        }
        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            reviewer_id: draft.reviewer_id,
            recipe_id: draft.recipe_id,
            rating: draft.rating,
            comment: draft.comment.clone(),
            created_at: now,
            updated_at: now,
        };
        guard.reviews.push(review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Review>, ReviewRepositoryError> {
        let guard = self.read().map_err(ReviewRepositoryError::query)?;
        Ok(guard.reviews.iter().find(|review| review.id == *id).cloned())
    }

    async fn find_by_reviewer_and_recipe(
        &self,
        reviewer_id: &Uuid,
        recipe_id: &Uuid,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let guard = self.read().map_err(ReviewRepositoryError::query)?;
        Ok(guard
            .reviews
            .iter()
            .find(|review| review.reviewer_id == *reviewer_id && review.recipe_id == *recipe_id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &ReviewFilter,
        sort: Sort,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let guard = self.read().map_err(ReviewRepositoryError::query)?;
        let mut matches: Vec<Review> = match filter {
            ReviewFilter::ByRecipe(recipe_id) => guard
                .reviews
                .iter()
                .filter(|review| review.recipe_id == *recipe_id)
                .cloned()
                .collect(),
            ReviewFilter::ByReviewer(reviewer_id) => guard
                .reviews
                .iter()
                .filter(|review| review.reviewer_id == *reviewer_id)
                .cloned()
                .collect(),
            // The document-store equivalent of a join on the recipe's
            // visibility flag.
            ReviewFilter::OnPublicRecipes => {
                let public_ids: Vec<Uuid> = guard
                    .recipes
                    .iter()
                    .filter(|recipe| recipe.is_public)
                    .map(|recipe| recipe.id)
                    .collect();
                guard
                    .reviews
                    .iter()
                    .filter(|review| public_ids.contains(&review.recipe_id))
                    .cloned()
                    .collect()
            }
        };
        newest_first(&mut matches, |review| review.created_at, sort);
        Ok(matches)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &ReviewPatch,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut guard = self.write().map_err(ReviewRepositoryError::query)?;
        let Some(review) = guard.reviews.iter_mut().find(|review| review.id == *id) else {
            return Ok(None);
        };
        review.apply(patch);
        review.updated_at = Utc::now();
        Ok(Some(review.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, ReviewRepositoryError> {
        let mut guard = self.write().map_err(ReviewRepositoryError::query)?;
        let before = guard.reviews.len();
        guard.reviews.retain(|review| review.id != *id);
        Ok(guard.reviews.len() < before)
    }

    async fn delete_by_recipe(&self, recipe_id: &Uuid) -> Result<u64, ReviewRepositoryError> {
        let mut guard = self.write().map_err(ReviewRepositoryError::query)?;
        let before = guard.reviews.len();
        guard.reviews.retain(|review| review.recipe_id != *recipe_id);
        Ok((before - guard.reviews.len()) as u64)
    }
}
