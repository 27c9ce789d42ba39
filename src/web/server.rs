//! Web server for jarstore.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::{JarstoreError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// HTTP server for the folder store.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| JarstoreError::Config(format!("invalid server address: {e}")))?;

        let app_state = AppState::from_config(config)?;
        tracing::info!(
            "Folder storage at: {}",
            app_state.store.root().display()
        );

        Ok(Self::with_state(addr, app_state))
    }

    /// Create a web server with prepared state.
    pub fn with_state(addr: SocketAddr, app_state: AppState) -> Self {
        Self {
            addr,
            app_state: Arc::new(app_state),
        }
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Server running on http://{}", listener.local_addr()?);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// Useful for tests binding port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Server running on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
