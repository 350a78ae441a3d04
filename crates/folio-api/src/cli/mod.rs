//! CLI command definitions for the `folio` binary.

pub mod cleanup;
pub mod import;
pub mod user;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use folio_core::service::cleanup::DEFAULT_RETENTION_DAYS;

/// Portfolio backend with a grounded chat assistant.
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "FOLIO_LOG_JSON")]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` from config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` from config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Load site, skills, projects, gigs and knowledge entries from a TOML file.
    Import {
        /// Path to the catalog file.
        file: PathBuf,
    },

    /// Create a user and print a bearer token for them.
    #[command(name = "create-user")]
    CreateUser {
        #[arg(long)]
        email: String,

        /// Display name.
        #[arg(long)]
        name: String,

        /// Grant staff access.
        #[arg(long)]
        staff: bool,
    },

    /// Delete old analytics events and stale anonymous chat sessions.
    Cleanup {
        /// Retention window in days.
        #[arg(long, default_value_t = DEFAULT_RETENTION_DAYS)]
        days: u32,

        /// Only report what would be deleted.
        #[arg(long)]
        dry_run: bool,
    },
}
