//! tictak - unified CLI
//!
//! Runs the HTTP transport or an interactive console session.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictak_server::{Config, Dispatcher, SessionRegistry, console, http};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    initialize_tracing(config.log_filter());

    let dispatcher = Dispatcher::new(SessionRegistry::new(), config.bot_name().clone());

    match cli.command {
        Command::Serve { host, port } => run_server(config.with_listen(host, port), dispatcher).await,
        Command::Console { chat } => run_console(dispatcher, chat).await,
    }
}

/// Run the HTTP server
#[instrument(skip_all)]
async fn run_server(config: Config, dispatcher: Dispatcher) -> Result<()> {
    info!("Starting tictak HTTP server");
    http::serve(&config, dispatcher).await
}

/// Run the console transport on stdin/stdout
#[instrument(skip(dispatcher))]
async fn run_console(dispatcher: Dispatcher, chat: String) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    console::run(&dispatcher, &chat, stdin, stdout).await
}

/// Logs go to stderr so the console transport keeps stdout to itself.
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
