//! Account repository trait definition.

use folio_types::account::{ApiToken, User};
use folio_types::error::RepositoryError;

/// Repository trait for users and their bearer tokens.
///
/// Tokens are only ever stored and looked up by their SHA-256 hash.
pub trait AccountRepository: Send + Sync {
    /// Create a user. Returns `Conflict` if the email is already registered.
    fn create_user(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Store a token hash for a user.
    fn create_token(
        &self,
        token: &ApiToken,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Resolve the owner of a token hash.
    fn find_user_by_token_hash(
        &self,
        key_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Set `last_used_at` on a token to now.
    fn touch_token(
        &self,
        key_hash: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
