//! Review entity, creation draft, and partial update patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validate::FieldErrors;
use crate::domain::ApiResult;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;
pub const COMMENT_MAX: usize = 1000;

/// Stored review. Both `reviewer_id` and `recipe_id` are immutable after
/// creation; at most one review exists per (reviewer, recipe) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub recipe_id: Uuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload; reviewer comes from the session, recipe from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub reviewer_id: Uuid,
    pub recipe_id: Uuid,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        validate_fields(&mut errors, self.rating, &self.comment);
        errors.into_result()
    }
}

/// Partial update; only the rating and comment are patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

impl Review {
    /// Merge a patch over the stored fields.
    pub fn apply(&mut self, patch: &ReviewPatch) {
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(comment) = &patch.comment {
            self.comment = comment.clone();
        }
    }

    /// Re-validate the merged state before persisting an update.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        validate_fields(&mut errors, self.rating, &self.comment);
        errors.into_result()
    }
}

fn validate_fields(errors: &mut FieldErrors, rating: u8, comment: &str) {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        errors.push(
            "rating",
            format!("Rating must be between {RATING_MIN} and {RATING_MAX}"),
        );
    }
    let comment_len = comment.trim().chars().count();
    if comment_len == 0 {
        errors.push("comment", "Comment is required");
    } else if comment_len > COMMENT_MAX {
        errors.push(
            "comment",
            format!("Comment must not exceed {COMMENT_MAX} characters"),
        );
    }
}
