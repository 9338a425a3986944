//! Port for cookbook persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::listing::{CookbookFilter, Sort};
use crate::domain::{Cookbook, CookbookPatch, NewCookbook};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by cookbook repository adapters.
    pub enum CookbookRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "cookbook store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "cookbook store query failed: {message}",
    }
}

/// Port for the cookbooks collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CookbookRepository: Send + Sync {
    async fn create(&self, draft: &NewCookbook) -> Result<Cookbook, CookbookRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Cookbook>, CookbookRepositoryError>;

    async fn list(
        &self,
        filter: &CookbookFilter,
        sort: Sort,
    ) -> Result<Vec<Cookbook>, CookbookRepositoryError>;

    /// Merge the patch over the stored document; `None` if absent.
    async fn update(
        &self,
        id: &Uuid,
        patch: &CookbookPatch,
    ) -> Result<Option<Cookbook>, CookbookRepositoryError>;

    /// Returns whether a document was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, CookbookRepositoryError>;
}
