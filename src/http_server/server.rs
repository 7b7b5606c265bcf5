//! # HTTP Server
//!
//! Combines the machine, health and metrics routers behind CORS and
//! request tracing.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::inventory::Inventory;
use crate::observability::Event;

use super::config::HttpServerConfig;
use super::machine_routes::{machine_routes, MachineState};
use super::observability_routes::{health_routes, observability_routes};

pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(inventory: Arc<Inventory>) -> Self {
        Self::with_config(HttpServerConfig::default(), inventory)
    }

    pub fn with_config(config: HttpServerConfig, inventory: Arc<Inventory>) -> Self {
        let router = Self::build_router(&config, inventory);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, inventory: Arc<Inventory>) -> Router {
        let metrics = inventory.metrics().clone();
        let machine_state = Arc::new(MachineState::new(inventory));

        let allow_origin = match config.allowed_origins() {
            Ok(None) => AllowOrigin::any(),
            Ok(Some(origins)) => AllowOrigin::list(origins),
            Err(reason) => {
                tracing::warn!(%reason, "no cross-origin requests allowed");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        };
        let cors = CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes())
            .nest("/api", machine_routes(machine_state))
            .nest("/observability", observability_routes(metrics))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Address the server will listen on
    pub fn listen_addr(&self) -> io::Result<SocketAddr> {
        self.config
            .listen_addr()
            .map_err(|reason| io::Error::new(io::ErrorKind::InvalidInput, reason))
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> io::Result<()> {
        let addr = self.listen_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(event = %Event::ServerStart, %addr, "machine inventory API listening");

        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::NoopCloudSync;
    use crate::store::MemMachineStore;

    fn inventory() -> Arc<Inventory> {
        Arc::new(Inventory::new(
            Arc::new(MemMachineStore::new()),
            Arc::new(NoopCloudSync),
        ))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(inventory());
        assert_eq!(server.listen_addr().unwrap().to_string(), "0.0.0.0:19000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::with_config(config, inventory());
        assert_eq!(server.listen_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_router_builds() {
        let _router = HttpServer::new(inventory()).router();
    }
}
