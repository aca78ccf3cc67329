//! # Song Errors
//!
//! Error types for the song service and its repositories.

use std::fmt;

use thiserror::Error;

use super::model::SongId;

/// Result type for song operations
pub type SongResult<T> = Result<T, SongError>;

/// Mutating operations guarded by business rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Past participle used in rule messages ("can not be updated")
    pub fn past_participle(&self) -> &'static str {
        match self {
            Operation::Create => "created",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Business rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessError {
    #[error("Song to create must not be null.")]
    MissingSong,

    #[error("The song title must not be null.")]
    MissingTitle,

    #[error("The song artist must not be null.")]
    MissingArtist,

    /// The protected system record was targeted
    #[error("Song with ID {id} can not be {}.", .operation.past_participle())]
    ReservedId { id: SongId, operation: Operation },

    #[error("A song with title '{0}' already exists.")]
    TitleAlreadyExists(String),

    /// Payload id differs from the path id
    #[error("Update IDs must be the same.")]
    IdMismatch {
        path: SongId,
        payload: Option<SongId>,
    },
}

/// Song service and repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SongError {
    #[error("Song {0} not found")]
    NotFound(SongId),

    #[error("{0}")]
    Business(#[from] BusinessError),

    /// Repository failure (SQLite error, poisoned lock)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SongError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SongError::NotFound(_) => 404,
            SongError::Business(_) => 422,
            SongError::Storage(_) => 500,
        }
    }

    /// Returns whether this error is the caller's fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<rusqlite::Error> for SongError {
    fn from(err: rusqlite::Error) -> Self {
        SongError::Storage(err.to_string())
    }
}
