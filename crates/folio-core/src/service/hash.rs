//! TokenIssuer trait for bearer token generation and hashing.
//!
//! Defined in folio-core so the account service can mint and verify tokens
//! without coupling to a specific RNG or digest. The `Sha256TokenIssuer`
//! adapter lives in folio-infra.

/// Abstraction over bearer token generation and hashing.
pub trait TokenIssuer: Send + Sync {
    /// Generate a new random plaintext token.
    fn generate(&self) -> String;

    /// Compute the hex-encoded hash stored for a token.
    fn hash(&self, token: &str) -> String;
}
