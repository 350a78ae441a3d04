//! Folio CLI and REST API entry point.
//!
//! Binary name: `folio`
//!
//! Parses CLI arguments, initializes tracing, database and services, then
//! dispatches to a command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use std::net::SocketAddr;

use clap::Parser;
use folio_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use tracing::{error, info};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,folio=debug",
        _ => "trace",
    };
    let mut tracing_options = TracingOptions::new(filter);
    tracing_options.json = cli.log_json;
    tracing_options.otel = cli.otel;
    init_tracing(&tracing_options)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Folio API listening on {}",
                    console::style("▸").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            info!(%addr, data_dir = %state.data_dir.display(), "server starting");

            let router = http::router::build_router(state);
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Import { file } => {
            cli::import::import_catalog(&state, &file, cli.json).await?;
        }

        Commands::CreateUser { email, name, staff } => {
            cli::user::create_user(&state, &email, &name, staff, cli.json).await?;
        }

        Commands::Cleanup { days, dry_run } => {
            cli::cleanup::cleanup(&state, days, dry_run, cli.json).await?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
