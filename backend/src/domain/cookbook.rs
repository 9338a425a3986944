//! Cookbook entity, creation draft, and partial update patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::recipe::DESCRIPTION_MAX;
use crate::domain::validate::FieldErrors;
use crate::domain::ApiResult;

pub const NAME_MAX: usize = 100;

/// Stored cookbook. `recipe_ids` may reference recipes the owner does not
/// own, including other users' public recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookbook {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub recipe_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload; owner comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCookbook {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub recipe_ids: Vec<Uuid>,
}

impl NewCookbook {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        validate_fields(&mut errors, &self.name, self.description.as_deref());
        errors.into_result()
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookbookPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub recipe_ids: Option<Vec<Uuid>>,
}

impl Cookbook {
    /// Merge a patch over the stored fields.
    pub fn apply(&mut self, patch: &CookbookPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(recipe_ids) = &patch.recipe_ids {
            self.recipe_ids = recipe_ids.clone();
        }
    }

    /// Re-validate the merged state before persisting an update.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        validate_fields(&mut errors, &self.name, self.description.as_deref());
        errors.into_result()
    }
}

fn validate_fields(errors: &mut FieldErrors, name: &str, description: Option<&str>) {
    let name_len = name.trim().chars().count();
    if name_len == 0 {
        errors.push("name", "Name is required");
    } else if name_len > NAME_MAX {
        errors.push("name", format!("Name must be between 1 and {NAME_MAX} characters"));
    }
    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX {
            errors.push(
                "description",
                format!("Description must not exceed {DESCRIPTION_MAX} characters"),
            );
        }
    }
}
