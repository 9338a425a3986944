//! Shared HTTP adapter state.
//!
//! Handlers accept this bundle via `actix_web::web::Data`, so they depend
//! on the domain services only and stay testable without a real server.

use crate::domain::{CookbookService, RecipeService, ReviewService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UserService,
    pub recipes: RecipeService,
    pub cookbooks: CookbookService,
    pub reviews: ReviewService,
}

impl HttpState {
    pub fn new(
        users: UserService,
        recipes: RecipeService,
        cookbooks: CookbookService,
        reviews: ReviewService,
    ) -> Self {
        Self {
            users,
            recipes,
            cookbooks,
            reviews,
        }
    }
}
