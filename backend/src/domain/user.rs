//! User entity and requester identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validate::FieldErrors;
use crate::domain::ApiResult;

/// The identity attached to a request by the session layer.
///
/// Authenticated operations never synthesise a fallback identity; an
/// anonymous requester is rejected before any ownership check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(Uuid),
}

impl Identity {
    /// The authenticated user id, if any.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    /// Whether this identity is the given user.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }
}

/// Application user, created or refreshed on OAuth login completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub oauth_id: String,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Verified profile supplied by the external identity provider after a
/// successful OAuth handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthProfile {
    pub oauth_id: String,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
}

impl OauthProfile {
    /// Check required fields before the upsert touches the store.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        if self.oauth_id.trim().is_empty() {
            errors.push("oauthId", "OAuth id is required");
        }
        if self.display_name.trim().is_empty() {
            errors.push("displayName", "Display name is required");
        }
        errors.into_result()
    }
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
}

impl UserPatch {
    /// Validate the fields present in the patch.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        if let Some(display_name) = &self.display_name {
            if display_name.trim().is_empty() {
                errors.push("displayName", "Display name must not be empty");
            }
        }
        errors.into_result()
    }
}

impl User {
    /// Merge a patch over the stored profile. `oauth_id` is immutable.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(display_name) = &patch.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = Some(last_name.clone());
        }
        if let Some(email) = &patch.email {
            self.email = Some(email.clone());
        }
        if let Some(url) = &patch.profile_image_url {
            self.profile_image_url = Some(url.clone());
        }
    }
}
