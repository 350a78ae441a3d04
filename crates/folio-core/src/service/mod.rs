//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and business rules. They depend on
//! traits (ports), never on concrete infrastructure implementations.

pub mod account;
pub mod analytics;
pub mod cleanup;
pub mod hash;
pub mod hire;
pub mod portfolio;
