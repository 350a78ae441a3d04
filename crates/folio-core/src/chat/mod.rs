//! Portfolio chat assistant.
//!
//! Pipeline for one query: [`context`] gathers catalog data, [`persona`] and
//! [`prompt`] assemble the system prompt, [`history`] replays earlier turns,
//! [`ai`] calls the model and [`sources`] resolves cited links. [`service`]
//! ties the steps to session persistence.

pub mod ai;
pub mod context;
pub mod history;
pub mod persona;
pub mod prompt;
pub mod repository;
pub mod service;
pub mod sources;
