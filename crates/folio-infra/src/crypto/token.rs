//! Bearer token generation and SHA-256 hashing.
//!
//! Implements the `TokenIssuer` port from `folio-core`. Tokens are 32 bytes
//! from the OS RNG, hex-encoded behind a `folio_` prefix. Only the SHA-256
//! digest of a token is ever stored.

use std::fmt::Write;

use folio_core::service::hash::TokenIssuer;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

const TOKEN_PREFIX: &str = "folio_";
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256TokenIssuer;

impl Sha256TokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for Sha256TokenIssuer {
    fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let mut token = String::with_capacity(TOKEN_PREFIX.len() + TOKEN_BYTES * 2);
        token.push_str(TOKEN_PREFIX);
        for b in bytes {
            // Writing to a String cannot fail.
            let _ = write!(token, "{b:02x}");
        }
        token
    }

    fn hash(&self, token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}
