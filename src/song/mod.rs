//! # Song Module
//!
//! Song records, the repository seam and the business-rule service.
//!
//! The service is generic over [`SongRepository`]; production uses
//! [`SqliteSongRepository`], tests and `serve --in-memory` use
//! [`InMemorySongRepository`].

pub mod errors;
pub mod model;
pub mod repository;
pub mod service;
pub mod sqlite;

pub use errors::{BusinessError, Operation, SongError, SongResult};
pub use model::{NewSong, Song, SongDraft, SongId, RESERVED_SONG_ID};
pub use repository::{InMemorySongRepository, SongRepository};
pub use service::{ensure_changeable, SongService};
pub use sqlite::SqliteSongRepository;
