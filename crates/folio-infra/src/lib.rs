//! Infrastructure layer for Folio.
//!
//! Contains implementations of the ports defined in `folio-core`: SQLite
//! storage, the OpenAI-compatible chat-completion provider, API token
//! hashing, and loading of the config and catalog files.

pub mod config;
pub mod crypto;
pub mod import;
pub mod llm;
pub mod sqlite;
