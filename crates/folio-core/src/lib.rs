//! Business logic and repository trait definitions for Folio.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, plus the chat pipeline that turns a visitor question
//! into a grounded answer. It depends only on `folio-types` -- never on
//! `folio-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
