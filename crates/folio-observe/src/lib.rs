//! Observability setup for Folio: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
