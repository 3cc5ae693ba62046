mod app;
mod cache;
mod config;
mod graph;
mod handlers;
mod services;
mod shell;
mod state;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    shell::{Shell, TerminalPrompt},
    state::{AppState, Stores},
};

/// CollabGraph - Track researchers, projects and publications
#[derive(Parser, Debug)]
#[command(name = "collabgraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "5000", env = "PORT")]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Run the interactive menu
    Shell,
    /// Load the demonstration dataset
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve);

    // Logs go to stderr so they do not interleave with the menu
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "collabgraph=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let stores = match Stores::connect(&config).await {
        Ok(stores) => stores,
        Err(err) => {
            tracing::error!(error = %err, "Failed to connect stores");
            return Err(err);
        }
    };
    let state = AppState::new(&stores, &config);

    let outcome = match command {
        Command::Serve => serve(&cli, state.clone()).await,
        Command::Shell => {
            let mut shell = Shell::new(&state, TerminalPrompt, std::io::stdout());
            shell.run().await
        }
        Command::Seed => match services::seed(&state.records).await {
            Ok(Some(summary)) => {
                println!(
                    "Seeded {} researchers, {} projects, {} collaborations",
                    summary.researchers, summary.projects, summary.collaborations
                );
                Ok(())
            }
            Ok(None) => {
                println!("Researchers already exist, nothing seeded");
                Ok(())
            }
            Err(err) => Err(err),
        },
    };

    drop(state);
    stores.shutdown().await;
    outcome
}

async fn serve(cli: &Cli, state: AppState) -> Result<()> {
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
