//! Command-line interface for tictak.

use clap::{Parser, Subcommand};

/// tictak - tic-tac-toe sessions for chat conversations
#[derive(Parser, Debug)]
#[command(name = "tictak")]
#[command(about = "Chat-driven tic-tac-toe game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (defaults apply if missing)
    #[arg(long, global = true, default_value = "tictak.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server (session REST API and chat webhooks)
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a single chat from the terminal
    Console {
        /// Chat identifier for the console session
        #[arg(long, default_value = "console")]
        chat: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["tictak", "serve", "--port", "8080"]).expect("valid args");
        assert!(matches!(
            cli.command,
            Command::Serve {
                host: None,
                port: Some(8080)
            }
        ));
        assert_eq!(cli.config, std::path::PathBuf::from("tictak.toml"));
    }

    #[test]
    fn test_parse_console_with_config() {
        let cli = Cli::try_parse_from(["tictak", "console", "--chat", "c1", "--config", "x.toml"])
            .expect("valid args");
        assert!(matches!(cli.command, Command::Console { ref chat } if chat == "c1"));
        assert_eq!(cli.config, std::path::PathBuf::from("x.toml"));
    }
}
