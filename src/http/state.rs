use crate::provider::CompletionClient;
use crate::session::SessionConfig;
use std::sync::Arc;

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    /// Provider client shared by every connection
    pub client: Arc<dyn CompletionClient>,

    /// Template for each new connection's session
    pub session_config: SessionConfig,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>, session_config: SessionConfig) -> Self {
        Self {
            client,
            session_config,
        }
    }
}
