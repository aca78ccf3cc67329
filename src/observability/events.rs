//! Observable events for songbook
//!
//! Events are explicit and typed; the logger only ever sees their
//! string form.

use std::fmt;

/// Observable events in songbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Database schema created or verified
    SchemaReady,
    /// Reserved system record written
    ReservedSongSeeded,
    /// Listening for HTTP requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped
    ShutdownComplete,
    /// Startup failed (FATAL)
    BootFailed,

    // Song operations
    /// Song persisted by create
    SongCreated,
    /// Song overwritten by update
    SongUpdated,
    /// Song removed
    SongDeleted,
    /// Business rule rejected an operation
    SongRejected,
    /// Repository failure
    StorageFailed,

    // HTTP
    /// Request served
    HttpRequest,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "SONGBOOK_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaReady => "SCHEMA_READY",
            Event::ReservedSongSeeded => "RESERVED_SONG_SEEDED",
            Event::Serving => "SONGBOOK_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "SONGBOOK_STARTUP_FAILED",

            Event::SongCreated => "SONG_CREATED",
            Event::SongUpdated => "SONG_UPDATED",
            Event::SongDeleted => "SONG_DELETED",
            Event::SongRejected => "SONG_REJECTED",
            Event::StorageFailed => "STORAGE_FAILED",

            Event::HttpRequest => "HTTP_REQUEST",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
