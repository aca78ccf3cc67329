//! songbook - a small, strict REST service for song records
//!
//! Layers, leaf first:
//! - [`song`]: records, repository seam, business-rule service
//! - [`rest_api`]: wire DTO, handlers, error to status mapping
//! - [`http_server`]: Axum server assembly
//! - [`observability`]: JSON logging and counters
//! - [`cli`]: `init` / `serve`

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod song;
