//! Server configuration and startup.

use crate::routes::router;
use crate::state::AppState;
use tracing::info;

/// Bind configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// The `host:port` address string.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The API server.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Creates a new server.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Binds the listener and serves until shutdown.
    ///
    /// # Errors
    /// Returns an error if binding or serving fails.
    pub async fn serve(self) -> std::io::Result<()> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(addr = %addr, "API server listening");
        axum::serve(listener, router(self.state)).await
    }
}
