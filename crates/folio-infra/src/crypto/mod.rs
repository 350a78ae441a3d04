//! Cryptographic adapters.

pub mod token;
