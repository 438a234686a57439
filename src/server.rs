use crate::config::Config;
use crate::http::{create_router, AppState};
use crate::provider::CompletionClientFactory;
use anyhow::{Context, Result};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Listener plus router; each accepted WebSocket gets its own session
pub struct RelayServer {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl RelayServer {
    /// Bind `addr` and prepare the router. Port 0 picks a free port.
    pub async fn bind(addr: &str, state: AppState) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            router: create_router(state),
            local_addr,
        })
    }

    /// Build the shared provider client from configuration and bind.
    pub async fn from_config(cfg: &Config) -> Result<Self> {
        let client = CompletionClientFactory::create(&cfg.provider)?;
        let state = AppState::new(client, cfg.session.clone());
        Self::bind(&cfg.bind_addr(), state).await
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
    }

    /// Serve until `shutdown` resolves
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Server started on http://{}", self.local_addr);
        info!("Chat page: http://{}/chat", self.local_addr);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        info!("Server stopped");
        Ok(())
    }
}
