//! Recipe entity, creation draft, and partial update patch.
//!
//! Field limits follow the API contract: title 1..=100 characters,
//! description at most 500, at least one ingredient and one instruction,
//! servings at least 1, tags 1..=50 characters each.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validate::FieldErrors;
use crate::domain::ApiResult;

pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const TAG_MAX: usize = 50;

/// A single ordered ingredient entry; both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

/// Stored recipe. `creator_id` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub creator_id: Uuid,
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

/// Creation payload. The creator id comes from the session, never from the
/// request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub is_public: bool,
    pub tags: Vec<String>,
}

impl NewRecipe {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        validate_fields(
            &mut errors,
            &self.title,
            self.description.as_deref(),
            &self.ingredients,
            &self.instructions,
            self.servings,
            &self.tags,
        );
        errors.into_result()
    }
}

/// Partial update; absent fields are left untouched. There is deliberately
/// no `creator_id` here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<String>>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl Recipe {
    /// Merge a patch over the stored fields.
    pub fn apply(&mut self, patch: &RecipePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(ingredients) = &patch.ingredients {
            self.ingredients = ingredients.clone();
        }
        if let Some(instructions) = &patch.instructions {
            self.instructions = instructions.clone();
        }
        if let Some(prep) = patch.prep_time_minutes {
            self.prep_time_minutes = Some(prep);
        }
        if let Some(cook) = patch.cook_time_minutes {
            self.cook_time_minutes = Some(cook);
        }
        if let Some(servings) = patch.servings {
            self.servings = Some(servings);
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
    }

    /// Re-validate the merged state before persisting an update.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        validate_fields(
            &mut errors,
            &self.title,
            self.description.as_deref(),
            &self.ingredients,
            &self.instructions,
            self.servings,
            &self.tags,
        );
        errors.into_result()
    }
}

fn validate_fields(
    errors: &mut FieldErrors,
    title: &str,
    description: Option<&str>,
    ingredients: &[Ingredient],
    instructions: &[String],
    servings: Option<u32>,
    tags: &[String],
) {
    let title_len = title.trim().chars().count();
    if title_len == 0 {
        errors.push("title", "Title is required");
    } else if title_len > TITLE_MAX {
        errors.push("title", format!("Title must be between 1 and {TITLE_MAX} characters"));
    }

    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX {
            errors.push(
                "description",
                format!("Description must not exceed {DESCRIPTION_MAX} characters"),
            );
        }
    }

    if ingredients.is_empty() {
        errors.push("ingredients", "At least one ingredient is required");
    }
    for (index, ingredient) in ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() {
            errors.push_indexed("ingredients", index, "Ingredient name is required");
        }
        if ingredient.quantity.trim().is_empty() {
            errors.push_indexed("ingredients", index, "Ingredient quantity is required");
        }
    }

    if instructions.is_empty() {
        errors.push("instructions", "At least one instruction is required");
    }
    for (index, instruction) in instructions.iter().enumerate() {
        if instruction.trim().is_empty() {
            errors.push_indexed("instructions", index, "Instructions cannot be empty");
        }
    }

    if servings == Some(0) {
        errors.push("servings", "Servings must be at least 1");
    }

    for (index, tag) in tags.iter().enumerate() {
        let len = tag.trim().chars().count();
        if len == 0 || len > TAG_MAX {
            errors.push_indexed(
                "tags",
                index,
                format!("Each tag must be between 1 and {TAG_MAX} characters"),
            );
        }
    }
}
