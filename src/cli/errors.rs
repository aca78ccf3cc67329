//! CLI-specific error types
//!
//! All CLI errors are fatal: printed to stderr, exit status 1.

use std::fmt;
use std::io;

use crate::song::SongError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error
    IoError,
    /// Database already exists
    AlreadyInitialized,
    /// Database missing
    NotInitialized,
    /// Store could not be opened or written
    StorageError,
    /// Server failed to start or crashed
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SONGBOOK_CLI_CONFIG_ERROR",
            Self::IoError => "SONGBOOK_CLI_IO_ERROR",
            Self::AlreadyInitialized => "SONGBOOK_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "SONGBOOK_CLI_NOT_INITIALIZED",
            Self::StorageError => "SONGBOOK_CLI_STORAGE_ERROR",
            Self::ServeFailed => "SONGBOOK_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn already_initialized(path: &str) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Database '{}' already initialized", path),
        )
    }

    pub fn not_initialized(path: &str) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!(
                "Database '{}' not initialized. Run 'songbook init' first.",
                path
            ),
        )
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<SongError> for CliError {
    fn from(e: SongError) -> Self {
        Self::new(CliErrorCode::StorageError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::not_initialized("./songbook.db");
        let display = err.to_string();
        assert!(display.starts_with("SONGBOOK_CLI_NOT_INITIALIZED: "));
        assert!(display.contains("./songbook.db"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let err = CliError::from(SongError::Storage("disk full".to_string()));
        assert_eq!(err.code(), &CliErrorCode::StorageError);
        assert_eq!(err.message(), "Storage error: disk full");
    }
}
