//! Command-line interface.

mod commands;

use clap::{Parser, Subcommand};

/// Shotify - screenshot template editor backend
#[derive(Debug, Parser)]
#[command(name = "shotify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    #[default]
    Serve,

    /// Insert the built-in template catalog if no templates exist
    Seed,

    /// Write a default config.toml to the working directory
    #[command(alias = "init")]
    InitConfig,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::parse_from(["shotify"]);
        assert_eq!(cli.command.unwrap_or_default(), Commands::Serve);
    }

    #[test]
    fn parses_subcommands() {
        assert_eq!(
            Cli::parse_from(["shotify", "seed"]).command,
            Some(Commands::Seed)
        );
        assert_eq!(
            Cli::parse_from(["shotify", "init-config"]).command,
            Some(Commands::InitConfig)
        );
        assert_eq!(
            Cli::parse_from(["shotify", "init"]).command,
            Some(Commands::InitConfig)
        );
    }
}
