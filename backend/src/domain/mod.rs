//! Domain layer: entities, visibility policy, and lifecycle services.
//!
//! Everything here is transport and storage agnostic. The HTTP adapter
//! drives the services; the services drive the repository ports in
//! [`ports`]. Entities carry their own validation and patch-merge logic so
//! create and update paths share one set of rules.

pub mod cookbook;
pub mod cookbooks;
pub mod error;
pub mod listing;
pub mod ports;
pub mod rating;
pub mod recipe;
pub mod recipes;
pub mod review;
pub mod reviews;
pub mod user;
pub mod users;
pub mod validate;
pub mod views;
pub mod visibility;

pub use cookbook::{Cookbook, CookbookPatch, NewCookbook};
pub use cookbooks::{CookbookInput, CookbookService};
pub use error::{ApiResult, Error, ErrorCode};
pub use rating::RatingSummary;
pub use recipe::{Ingredient, NewRecipe, Recipe, RecipePatch};
pub use recipes::{RecipeInput, RecipeService};
pub use review::{NewReview, Review, ReviewPatch};
pub use reviews::{RecipeReviews, ReviewInput, ReviewService};
pub use user::{Identity, OauthProfile, User, UserPatch};
pub use users::UserService;
pub use views::{CookbookView, RecipeView, ReviewView, UserSummary};
pub use visibility::VisibilityPolicy;

/// Record a store failure and convert it into the opaque internal error the
/// client sees. `context` is the short operation description ("Failed to
/// create recipe"); the underlying cause goes to the log only.
pub(crate) fn store_failure(error: impl std::fmt::Display, context: &str) -> Error {
    tracing::error!(error = %error, context, "entity store failure");
    Error::internal(context)
}
