//! Request extractors: caller identity, client metadata and envelope-aware
//! JSON/query parsing.

pub mod auth;
pub mod client;
pub mod json;
