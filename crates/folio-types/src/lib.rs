//! Shared domain types for Folio.
//!
//! This crate contains the domain types used across the Folio portfolio
//! backend: the portfolio catalog, chat sessions and messages, accounts,
//! analytics events, hire requests, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod account;
pub mod analytics;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod hire;
pub mod import;
pub mod llm;
