//! User profile service and OAuth login upsert.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::listing::{RecipeFilter, Sort};
use crate::domain::ports::{RecipeRepository, UserRepository};
use crate::domain::views::RecipeView;
use crate::domain::visibility::VisibilityPolicy;
use crate::domain::{store_failure, ApiResult, Error, Identity, OauthProfile, User, UserPatch};

/// Profile operations and the login-completion upsert.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    recipes: Arc<dyn RecipeRepository>,
    policy: VisibilityPolicy,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        recipes: Arc<dyn RecipeRepository>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            users,
            recipes,
            policy,
        }
    }

    /// Complete an OAuth login: create the user on first sight of this
    /// OAuth id, otherwise refresh the stored profile from the provider's
    /// latest claims. Returns the user to bind to the session.
    pub async fn login(&self, profile: OauthProfile) -> ApiResult<User> {
        profile.validate()?;

        let existing = self
            .users
            .find_by_oauth_id(&profile.oauth_id)
            .await
            .map_err(|err| store_failure(err, "Failed to complete login"))?;

        match existing {
            Some(user) => {
                let refresh = UserPatch {
                    display_name: Some(profile.display_name),
                    first_name: profile.first_name,
                    last_name: profile.last_name,
                    email: profile.email,
                    profile_image_url: profile.profile_image_url,
                };
                self.users
                    .update(&user.id, &refresh)
                    .await
                    .map_err(|err| store_failure(err, "Failed to complete login"))?
                    .ok_or_else(|| Error::internal("Failed to complete login"))
            }
            None => self
                .users
                .create(&profile)
                .await
                .map_err(|err| store_failure(err, "Failed to complete login")),
        }
    }

    /// The authenticated requester's own profile. A session pointing at a
    /// deleted user resolves to 404 so the client can clear it.
    pub async fn current(&self, requester: Identity) -> ApiResult<User> {
        let user_id = requester
            .user_id()
            .ok_or_else(|| Error::unauthenticated("Authentication required"))?;
        self.load(&user_id).await
    }

    /// Another user's public recipes, newest first. Anonymous-accessible;
    /// 404 when the user does not exist.
    pub async fn public_recipes(&self, user_id: Uuid) -> ApiResult<Vec<RecipeView>> {
        let user = self.load(&user_id).await?;

        let recipes = self
            .recipes
            .list(
                &RecipeFilter::public_by_creator(user_id),
                Sort::CreatedAtDesc,
            )
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve recipes"))?;
        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeView::new(recipe, Some(&user)))
            .collect())
    }

    /// Update a profile; self only. `oauth_id` is immutable.
    pub async fn update(
        &self,
        requester: Identity,
        user_id: Uuid,
        patch: UserPatch,
    ) -> ApiResult<User> {
        self.policy.update_user(user_id, requester)?;
        patch.validate()?;

        self.users
            .update(&user_id, &patch)
            .await
            .map_err(|err| store_failure(err, "Failed to update user"))?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    /// Delete an account; self only. The user's recipes, cookbooks, and
    /// reviews are left in place and populate as `null` references.
    pub async fn delete(&self, requester: Identity, user_id: Uuid) -> ApiResult<Uuid> {
        self.policy.delete_user(user_id, requester)?;

        let deleted = self
            .users
            .delete(&user_id)
            .await
            .map_err(|err| store_failure(err, "Failed to delete user"))?;
        if deleted {
            Ok(user_id)
        } else {
            Err(Error::not_found("User not found"))
        }
    }

    async fn load(&self, id: &Uuid) -> ApiResult<User> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(err, "Failed to retrieve user"))?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
