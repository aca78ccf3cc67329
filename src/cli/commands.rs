//! CLI command implementations
//!
//! `init` prepares the SQLite store; `serve` boots the HTTP server over
//! it (or over an in-memory store).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, Severity};
use crate::song::{SongService, SqliteSongRepository};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure (JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default "./songbook.db")
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Minimum log severity: trace, info, warn, error, fatal (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> String {
    "./songbook.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> CliResult<Self> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?
        } else {
            Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Get database path as Path
    pub fn database_path(&self) -> &Path {
        Path::new(&self.database_path)
    }
}

/// Load the config, apply its log level and announce it
fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let path = config_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("config", path.as_str()),
            ("database_path", config.database_path.as_str()),
        ],
    );
    Ok(config)
}

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
///
/// A failing command is logged as a FATAL `SONGBOOK_STARTUP_FAILED` line
/// before the error is returned.
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Init { config } => init(&config),
        Command::Serve {
            config,
            port,
            in_memory,
        } => serve(&config, port, in_memory),
    };

    if let Err(err) = &result {
        log_event_with_fields(
            Event::BootFailed,
            &[("code", err.code_str()), ("error", err.message())],
        );
    }
    result
}

/// Create the database, its schema and the reserved system record.
///
/// Refuses to touch an existing database file.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let db_path = config.database_path();

    if db_path.exists() {
        return Err(CliError::already_initialized(&config.database_path));
    }
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let repository = SqliteSongRepository::open(db_path)?;
    log_event_with_fields(
        Event::SchemaReady,
        &[("database_path", config.database_path.as_str())],
    );

    if repository.seed_reserved_song()? {
        log_event(Event::ReservedSongSeeded);
    }

    Ok(())
}

/// Start the HTTP server and block until shutdown
pub fn serve(config_path: &Path, port: Option<u16>, in_memory: bool) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    log_event(Event::BootStart);

    let server = if in_memory {
        HttpServer::in_memory(config.http.clone())
    } else {
        let db_path = config.database_path();
        if !db_path.exists() {
            return Err(CliError::not_initialized(&config.database_path));
        }
        let repository = SqliteSongRepository::open(db_path)?;
        log_event_with_fields(
            Event::SchemaReady,
            &[("database_path", config.database_path.as_str())],
        );
        HttpServer::new(config.http.clone(), SongService::new(repository))
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
