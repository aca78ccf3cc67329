//! Observability subsystem for songbook
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and domain events
//! - Monotonic counters
//!
//! # Usage
//!
//! ```ignore
//! use songbook::observability::{Event, Logger, MetricsRegistry};
//!
//! Logger::info("SONG_CREATED", &[("id", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_songs_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}

fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Only verifies no panic
        log_event(Event::BootStart);
        log_event_with_fields(Event::ConfigLoaded, &[("database_path", "/tmp/songs.db")]);
    }

    #[test]
    fn test_boot_failure_logs_at_fatal() {
        assert_eq!(event_severity(Event::BootFailed), Severity::Fatal);
        assert_eq!(event_severity(Event::Serving), Severity::Info);
        assert!(Severity::Fatal >= Logger::min_severity());
    }
}
