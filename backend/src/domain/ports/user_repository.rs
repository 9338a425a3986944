//! Port for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{OauthProfile, User, UserPatch};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user store query failed: {message}",
    }
}

/// Port for the users collection.
///
/// The adapter assigns ids and timestamps on `create` and bumps
/// `updated_at` on `update`. `update` and `delete` report a missing target
/// through their return value, not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user from a verified OAuth profile.
    async fn create(&self, profile: &OauthProfile) -> Result<User, UserRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Look up the user previously created for this OAuth subject.
    async fn find_by_oauth_id(&self, oauth_id: &str)
        -> Result<Option<User>, UserRepositoryError>;

    /// Merge the patch over the stored document; `None` if absent.
    async fn update(
        &self,
        id: &Uuid,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Returns whether a document was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, UserRepositoryError>;
}
