//! Visibility and ownership policy.
//!
//! Pure decision logic: given a freshly loaded resource and the requesting
//! identity, decide whether an operation is allowed. Services must never
//! evaluate these rules against cached or client-supplied state; the entity
//! the policy sees is the one just read from the store.
//!
//! Anonymous requesters attempting login-required operations are denied with
//! [`Denial::Unauthenticated`] (401). Authenticated requesters failing an
//! ownership or visibility rule get [`Denial::Forbidden`] (403).

use uuid::Uuid;

use crate::domain::{Cookbook, Error, Identity, Recipe, Review};

/// Why an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    Forbidden(String),
}

impl From<Denial> for Error {
    fn from(value: Denial) -> Self {
        match value {
            Denial::Unauthenticated => Error::unauthenticated("Authentication required"),
            Denial::Forbidden(reason) => Error::forbidden(reason),
        }
    }
}

type Decision = Result<(), Denial>;

fn forbidden(reason: &str) -> Decision {
    Err(Denial::Forbidden(reason.to_owned()))
}

fn require_user(requester: Identity) -> Result<Uuid, Denial> {
    requester.user_id().ok_or(Denial::Unauthenticated)
}

/// Access rules for recipes, cookbooks, and reviews.
///
/// `public_cookbook_reads` opts into the variant where any authenticated
/// user may read another user's cookbook; the default is owner-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityPolicy {
    public_cookbook_reads: bool,
}

impl VisibilityPolicy {
    pub fn new(public_cookbook_reads: bool) -> Self {
        Self {
            public_cookbook_reads,
        }
    }

    // --- Recipes ---

    /// Public recipes are readable by anyone, private ones by their creator
    /// only. An anonymous read of a private recipe is 403, not 401: reads
    /// are not a login-required operation.
    pub fn read_recipe(&self, recipe: &Recipe, requester: Identity) -> Decision {
        if recipe.is_public || requester.is(recipe.creator_id) {
            Ok(())
        } else {
            forbidden("Access denied. This recipe is private.")
        }
    }

    pub fn update_recipe(&self, recipe: &Recipe, requester: Identity) -> Decision {
        if require_user(requester)? == recipe.creator_id {
            Ok(())
        } else {
            forbidden("Access denied. You can only update your own recipes.")
        }
    }

    pub fn delete_recipe(&self, recipe: &Recipe, requester: Identity) -> Decision {
        if require_user(requester)? == recipe.creator_id {
            Ok(())
        } else {
            forbidden("Access denied. You can only delete your own recipes.")
        }
    }

    // --- Cookbooks ---

    pub fn read_cookbook(&self, cookbook: &Cookbook, requester: Identity) -> Decision {
        let user_id = require_user(requester)?;
        if self.public_cookbook_reads || user_id == cookbook.owner_id {
            Ok(())
        } else {
            forbidden("Access denied. You can only access your own cookbooks.")
        }
    }

    pub fn update_cookbook(&self, cookbook: &Cookbook, requester: Identity) -> Decision {
        if require_user(requester)? == cookbook.owner_id {
            Ok(())
        } else {
            forbidden("Access denied. You can only update your own cookbooks.")
        }
    }

    pub fn delete_cookbook(&self, cookbook: &Cookbook, requester: Identity) -> Decision {
        if require_user(requester)? == cookbook.owner_id {
            Ok(())
        } else {
            forbidden("Access denied. You can only delete your own cookbooks.")
        }
    }

    // --- Reviews ---

    /// Reviews may only target public recipes; even the creator cannot
    /// review their own private recipe.
    pub fn create_review(&self, recipe: &Recipe, requester: Identity) -> Decision {
        require_user(requester)?;
        if recipe.is_public {
            Ok(())
        } else {
            forbidden("Cannot review a private recipe")
        }
    }

    /// Reviews on a recipe are listable when the recipe is public or the
    /// requester created it.
    pub fn list_recipe_reviews(&self, recipe: &Recipe, requester: Identity) -> Decision {
        if recipe.is_public || requester.is(recipe.creator_id) {
            Ok(())
        } else {
            forbidden("Cannot view reviews for a private recipe")
        }
    }

    /// A single review is readable when the recipe is public, or the
    /// requester is the recipe's creator or the review's author.
    pub fn read_review(&self, review: &Review, recipe: &Recipe, requester: Identity) -> Decision {
        if recipe.is_public || requester.is(recipe.creator_id) || requester.is(review.reviewer_id)
        {
            Ok(())
        } else {
            forbidden("Access denied. Cannot view review for private recipe.")
        }
    }

    pub fn update_review(&self, review: &Review, requester: Identity) -> Decision {
        if require_user(requester)? == review.reviewer_id {
            Ok(())
        } else {
            forbidden("Access denied. You can only update your own reviews.")
        }
    }

    pub fn delete_review(&self, review: &Review, requester: Identity) -> Decision {
        if require_user(requester)? == review.reviewer_id {
            Ok(())
        } else {
            forbidden("Access denied. You can only delete your own reviews.")
        }
    }

    // --- Users ---

    pub fn update_user(&self, target: Uuid, requester: Identity) -> Decision {
        if require_user(requester)? == target {
            Ok(())
        } else {
            forbidden("Access denied. You can only update your own profile.")
        }
    }

    pub fn delete_user(&self, target: Uuid, requester: Identity) -> Decision {
        if require_user(requester)? == target {
            Ok(())
        } else {
            forbidden("Access denied. You can only delete your own account.")
        }
    }
}
