//! Command-line interface for cityscope.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// cityscope - location, weather, event and movie lookups behind a
/// persistent cache
#[derive(Parser)]
#[command(name = "cityscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config.toml (otherwise the default search paths are used)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Port for the HTTP server, overriding config and PORT
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Resolve a location through the cache and print it
    #[command(alias = "l")]
    Lookup {
        /// Free-text location query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Apply database migrations and exit
    Migrate,
}

impl Cli {
    /// Loads the config file, then layers `.env`, environment variables and
    /// command-line flags on top.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };

        config.apply_env_overrides()?;

        if let Some(port) = self.port {
            config.server.port = port;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::parse_from(["cityscope", "--port", "4000", "lookup", "New", "York"]);
        assert_eq!(cli.port, Some(4000));
        match cli.command {
            Some(Commands::Lookup { query }) => assert_eq!(query.join(" "), "New York"),
            _ => panic!("expected lookup command"),
        }
    }

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["cityscope"]);
        assert!(cli.command.is_none());
    }
}
