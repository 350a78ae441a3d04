//! HTTP request handlers for the REST API.

pub mod analytics;
pub mod chat;
pub mod hire;
pub mod portfolio;
