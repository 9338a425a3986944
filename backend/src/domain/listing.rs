//! Ownership-scoped list filters and the ordering contract.
//!
//! Filters are built here and interpreted by the entity-store adapter, so a
//! service can never accidentally widen a listing beyond what the requester
//! may see. All listings return the full result set ordered newest first,
//! ties kept in insertion order; there is no pagination.

use uuid::Uuid;

/// Listing order. Creation time descending is the only contract the API
/// offers; adapters must keep ties stable in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sort {
    #[default]
    CreatedAtDesc,
}

/// Filter over the recipes collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub creator_id: Option<Uuid>,
    pub is_public: Option<bool>,
}

impl RecipeFilter {
    /// The anonymous-visible listing: public recipes only.
    pub fn public() -> Self {
        Self {
            creator_id: None,
            is_public: Some(true),
        }
    }

    /// "My recipes": everything the owner created, private included.
    pub fn owned_by(creator_id: Uuid) -> Self {
        Self {
            creator_id: Some(creator_id),
            is_public: None,
        }
    }

    /// A user's publicly visible recipes, for profile pages.
    pub fn public_by_creator(creator_id: Uuid) -> Self {
        Self {
            creator_id: Some(creator_id),
            is_public: Some(true),
        }
    }
}

/// Filter over the cookbooks collection. Cookbooks have no public flag, so
/// the only listing is owner-scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookFilter {
    pub owner_id: Uuid,
}

impl CookbookFilter {
    pub fn owned_by(owner_id: Uuid) -> Self {
        Self { owner_id }
    }
}

/// Filter over the reviews collection.
///
/// `on_public_recipes` needs a recipe lookup in the adapter (the document
/// store's equivalent of a join); the other variants are plain field
/// matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewFilter {
    ByRecipe(Uuid),
    ByReviewer(Uuid),
    OnPublicRecipes,
}
