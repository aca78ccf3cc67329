//! # songbook REST API Module
//!
//! HTTP endpoints for CRUD operations on songs, the wire DTO and the
//! mapping from domain errors to status codes.

pub mod dto;
pub mod errors;
pub mod handler;

pub use dto::SongDto;
pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::{song_routes, SONGS_PATH};
