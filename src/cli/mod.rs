//! CLI module for songbook
//!
//! Provides command-line interface for:
//! - init: Create and seed the SQLite database
//! - serve: Run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
