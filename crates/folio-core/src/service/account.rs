//! Account service: user creation and bearer-token authentication.

use chrono::Utc;
use folio_types::account::{ApiToken, User};
use folio_types::error::{AccountError, RepositoryError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::repository::account::AccountRepository;
use crate::service::hash::TokenIssuer;

/// Loose shape check: one `@` with text on both sides and a dot in the domain.
pub(crate) fn is_email_address(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() > 1
                && domain.split('.').all(|part| !part.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Creates users and resolves bearer tokens to users.
///
/// Plaintext tokens are returned exactly once, at creation. Only their hash
/// is persisted.
pub struct AccountService<R: AccountRepository, T: TokenIssuer> {
    repo: R,
    issuer: T,
}

impl<R: AccountRepository, T: TokenIssuer> AccountService<R, T> {
    pub fn new(repo: R, issuer: T) -> Self {
        Self { repo, issuer }
    }

    /// Create a user and a first token. Returns the user and the plaintext token.
    pub async fn create_user(
        &self,
        email: &str,
        display_name: &str,
        is_staff: bool,
    ) -> Result<(User, String), AccountError> {
        let email = email.trim().to_lowercase();
        if !is_email_address(&email) {
            return Err(AccountError::Invalid(format!("'{email}' is not an email address")));
        }
        if self.repo.find_user_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken(email));
        }

        let user = User {
            id: Uuid::now_v7(),
            display_name: display_name.trim().to_string(),
            email,
            is_staff,
            created_at: Utc::now(),
        };
        self.repo.create_user(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AccountError::EmailTaken(user.email.clone()),
            other => AccountError::Repository(other),
        })?;

        let token = self.issue_token(&user.id).await?;
        info!(user_id = %user.id, is_staff, "user created");
        Ok((user, token))
    }

    /// Mint an additional token for an existing user.
    pub async fn issue_token(&self, user_id: &Uuid) -> Result<String, AccountError> {
        let token = self.issuer.generate();
        self.repo
            .create_token(&ApiToken {
                id: Uuid::now_v7(),
                user_id: *user_id,
                key_hash: self.issuer.hash(&token),
                created_at: Utc::now(),
                last_used_at: None,
            })
            .await?;
        Ok(token)
    }

    /// Resolve a plaintext bearer token to its user.
    ///
    /// Touching `last_used_at` is best effort: a failure is logged and the
    /// request still authenticates.
    pub async fn authenticate(&self, token: &str) -> Result<User, AccountError> {
        let key_hash = self.issuer.hash(token);
        let user = self
            .repo
            .find_user_by_token_hash(&key_hash)
            .await?
            .ok_or(AccountError::InvalidToken)?;

        if let Err(e) = self.repo.touch_token(&key_hash).await {
            warn!(user_id = %user.id, error = %e, "failed to update token last_used_at");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryAccountRepository;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Deterministic issuer: tokens are `tok-<n>`, hashes are `h:<token>`.
    #[derive(Default)]
    struct CountingIssuer {
        next: AtomicU32,
    }

    impl TokenIssuer for CountingIssuer {
        fn generate(&self) -> String {
            format!("tok-{}", self.next.fetch_add(1, Ordering::SeqCst))
        }

        fn hash(&self, token: &str) -> String {
            format!("h:{token}")
        }
    }

    fn service() -> (AccountService<InMemoryAccountRepository, CountingIssuer>, InMemoryAccountRepository) {
        let repo = InMemoryAccountRepository::new();
        (AccountService::new(repo.clone(), CountingIssuer::default()), repo)
    }

    #[tokio::test]
    async fn test_create_user_stores_only_hash() {
        let (svc, repo) = service();
        let (user, token) = svc.create_user(" Ada@Example.com ", "Ada", true).await.unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_staff);
        assert_eq!(token, "tok-0");
        let tokens = repo.tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].key_hash, "h:tok-0");
        assert_eq!(tokens[0].user_id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (svc, _) = service();
        svc.create_user("ada@example.com", "Ada", false).await.unwrap();
        let err = svc.create_user("ADA@example.com", "Ada 2", false).await.unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let (svc, _) = service();
        for email in ["ada", "@example.com", "ada@"] {
            let err = svc.create_user(email, "Ada", false).await.unwrap_err();
            assert!(matches!(err, AccountError::Invalid(_)), "{email}");
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email_address("grace@example.co.uk"));
        for bad in ["grace", "grace@", "grace@host", "grace@a..b", "a@b@c.io", "gr ace@x.io"] {
            assert!(!is_email_address(bad), "{bad}");
        }
    }

    #[tokio::test]
    async fn test_authenticate_touches_token() {
        let (svc, repo) = service();
        let (user, token) = svc.create_user("ada@example.com", "Ada", false).await.unwrap();

        let found = svc.authenticate(&token).await.unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.tokens()[0].last_used_at.is_some());

        let err = svc.authenticate("tok-999").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidToken));
    }
}
