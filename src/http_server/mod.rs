//! # songbook HTTP Server Module
//!
//! Combines the song router with health and observability endpoints into
//! one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/songs` - Song CRUD
//! - `/observability/*` - Health and counters

pub mod config;
pub mod middleware;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use middleware::REQUEST_ID_HEADER;
pub use server::HttpServer;
