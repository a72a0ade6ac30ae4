//! Web server implementation
//!
//! Provides the main server struct and configuration.

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::routes::{app_routes, AppState};
use super::shutdown::wait_for_shutdown_signal;
use super::{DEFAULT_BIND, DEFAULT_PORT};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Address to bind to
    pub bind: String,
    /// Maximum request body in bytes (None = unlimited)
    pub upload_limit: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            upload_limit: None,
        }
    }
}

impl ServerConfig {
    /// Create a new server config with the given port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Create a new server config with the given bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Create a new server config with the given upload limit
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit = Some(limit);
        self
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.bind.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Web server instance
pub struct WebServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server with default configuration
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new web server with the given configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new()),
        }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        // Uploads are unbounded unless a limit is configured. The limit is
        // enforced by the multipart extractor so overflows surface as
        // `AppError::Multipart` with a JSON body.
        let body_limit = match self.config.upload_limit {
            Some(limit) => DefaultBodyLimit::max(limit),
            None => DefaultBodyLimit::disable(),
        };

        app_routes()
            .layer(body_limit)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until SIGINT or SIGTERM
    pub async fn run(&self) -> anyhow::Result<()> {
        let addr = self
            .config
            .socket_addr()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind))?;
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        let local = listener.local_addr()?;

        info!("Starting server on http://{}", local);
        info!("Endpoints:");
        info!("  GET  /         - Upload page");
        info!("  POST /preview  - Preview first {} rows as JSON", super::PREVIEW_ROWS);
        info!("  POST /convert  - Convert CSV to XLSX");
        info!("  GET  /health   - Health check");
        match self.config.upload_limit {
            Some(limit) => info!("Upload limit: {} bytes", limit),
            None => info!("Upload limit: none"),
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(wait_for_shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

impl Default for WebServer {
    fn default() -> Self {
        Self::new()
    }
}
