//! CLI argument definitions using clap
//!
//! Commands:
//! - songbook init --config <path>
//! - songbook serve --config <path> [--port <port>] [--in-memory]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// songbook - a small REST service for song records
#[derive(Parser, Debug)]
#[command(name = "songbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the song database and seed the reserved system record
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./songbook.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./songbook.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Serve from a throwaway in-memory store instead of the database
        #[arg(long)]
        in_memory: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["songbook", "serve"]).unwrap();
        match cli.command {
            Command::Serve {
                config,
                port,
                in_memory,
            } => {
                assert_eq!(config, PathBuf::from("./songbook.json"));
                assert_eq!(port, None);
                assert!(!in_memory);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "songbook",
            "serve",
            "--config",
            "/etc/songbook.json",
            "--port",
            "9000",
            "--in-memory",
        ])
        .unwrap();
        match cli.command {
            Command::Serve {
                config,
                port,
                in_memory,
            } => {
                assert_eq!(config, PathBuf::from("/etc/songbook.json"));
                assert_eq!(port, Some(9000));
                assert!(in_memory);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_parses() {
        let cli = Cli::try_parse_from(["songbook", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init { .. }));
    }
}
