//! Repository ports for the entity store.
//!
//! One trait per collection; adapters own id and timestamp assignment so
//! the domain never fabricates either. The real database engine sits
//! behind these interfaces.

mod macros;

pub mod cookbook_repository;
pub mod recipe_repository;
pub mod review_repository;
pub mod user_repository;

pub use cookbook_repository::{CookbookRepository, CookbookRepositoryError};
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
pub use user_repository::{UserRepository, UserRepositoryError};

#[cfg(test)]
pub use cookbook_repository::MockCookbookRepository;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
