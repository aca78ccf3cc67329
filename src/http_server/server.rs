//! # HTTP Server
//!
//! Main HTTP server combining the song, health and observability routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::middleware::log_requests;
use super::observability_routes::{health_routes, observability_routes};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::rest_api::{song_routes, SONGS_PATH};
use crate::song::{InMemorySongRepository, SongRepository, SongService};

/// HTTP Server for songbook
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server around a song service
    pub fn new<R: SongRepository + 'static>(config: HttpServerConfig, service: SongService<R>) -> Self {
        let router = Self::build_router(&config, Arc::new(service));
        Self { config, router }
    }

    /// Server over a fresh in-memory store seeded with the reserved song
    pub fn in_memory(config: HttpServerConfig) -> Self {
        Self::new(
            config,
            SongService::new(InMemorySongRepository::with_reserved_song()),
        )
    }

    fn build_router<R: SongRepository + 'static>(
        config: &HttpServerConfig,
        service: Arc<SongService<R>>,
    ) -> Router {
        let metrics = service.metrics().clone();

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest(SONGS_PATH, song_routes(service))
            .nest("/observability", observability_routes(metrics.clone()))
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn_with_state(metrics, log_requests))
                    .layer(cors),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", local_addr.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

async fn shutdown_signal() {
    // An error here means no signal handler could be installed; the
    // server then runs until killed.
    if tokio::signal::ctrl_c().await.is_ok() {
        log_event(Event::ShutdownStart);
    } else {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_server_socket_addr() {
        let server = HttpServer::in_memory(HttpServerConfig::with_port(8081));
        assert_eq!(server.socket_addr(), "0.0.0.0:8081");
    }

    #[tokio::test]
    async fn test_health_route() {
        let router = HttpServer::in_memory(HttpServerConfig::default()).router();
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_reserved_song_is_listed() {
        let router = HttpServer::in_memory(HttpServerConfig::default()).router();
        let response = router
            .oneshot(Request::builder().uri("/songs/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_song_is_404() {
        let router = HttpServer::in_memory(HttpServerConfig::default()).router();
        let response = router
            .oneshot(Request::builder().uri("/songs/999").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
