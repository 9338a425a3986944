//! Populated response view models.
//!
//! The store holds bare foreign keys; responses carry denormalised
//! summaries of the referenced user or recipe instead. Views are built from
//! freshly loaded entities after the visibility check and never written
//! back, so populating a response cannot mutate stored state. A reference
//! whose target has since been deleted populates as `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Cookbook, Ingredient, Recipe, Review, User};

/// Display fields of a referenced user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Display fields of a referenced recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            is_public: recipe.is_public,
        }
    }
}

/// A recipe with its creator populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: Uuid,
    pub creator: Option<UserSummary>,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeView {
    pub fn new(recipe: Recipe, creator: Option<&User>) -> Self {
        Self {
            id: recipe.id,
            creator: creator.map(UserSummary::from),
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            prep_time_minutes: recipe.prep_time_minutes,
            cook_time_minutes: recipe.cook_time_minutes,
            servings: recipe.servings,
            is_public: recipe.is_public,
            tags: recipe.tags,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// A cookbook with its owner and recipe references populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookbookView {
    pub id: Uuid,
    pub owner: Option<UserSummary>,
    pub name: String,
    pub description: Option<String>,
    pub recipes: Vec<RecipeSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CookbookView {
    /// `recipes` must be the resolved targets of `cookbook.recipe_ids`, in
    /// the same order; ids whose recipe no longer exists are omitted.
    pub fn new(cookbook: Cookbook, owner: Option<&User>, recipes: Vec<RecipeSummary>) -> Self {
        Self {
            id: cookbook.id,
            owner: owner.map(UserSummary::from),
            name: cookbook.name,
            description: cookbook.description,
            recipes,
            created_at: cookbook.created_at,
            updated_at: cookbook.updated_at,
        }
    }
}

/// A review with its reviewer and target recipe populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: Uuid,
    pub rating: u8,
    pub comment: String,
    pub reviewer: Option<UserSummary>,
    pub recipe: Option<RecipeSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewView {
    pub fn new(review: Review, reviewer: Option<&User>, recipe: Option<&Recipe>) -> Self {
        Self {
            id: review.id,
            rating: review.rating,
            comment: review.comment,
            reviewer: reviewer.map(UserSummary::from),
            recipe: recipe.map(RecipeSummary::from),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}
