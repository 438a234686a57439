use super::gemini::GeminiClient;
use super::outcome::CompletionOutcome;
use crate::config::ProviderConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Text-generation provider
///
/// One instance is built at startup and shared by every connection, so
/// implementations must be immutable after construction. Each call is a
/// single-shot request with no conversation history and no retries.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Answer one user message. Never fails: every failure mode is an outcome.
    async fn complete(&self, prompt: &str) -> CompletionOutcome;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Client used when no credential is available. Performs no I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableClient;

#[async_trait::async_trait]
impl CompletionClient for UnavailableClient {
    async fn complete(&self, _prompt: &str) -> CompletionOutcome {
        CompletionOutcome::Unavailable
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// Completion client factory
pub struct CompletionClientFactory;

impl CompletionClientFactory {
    /// Build the shared client. A missing credential degrades to
    /// [`UnavailableClient`] instead of failing startup.
    pub fn create(config: &ProviderConfig) -> Result<Arc<dyn CompletionClient>> {
        match config.resolve_api_key() {
            Some(api_key) => {
                let client = GeminiClient::new(config.clone(), api_key)?;
                info!("Gemini client initialized (model: {})", config.model);
                Ok(Arc::new(client))
            }
            None => {
                warn!("No provider API key configured; AI replies are disabled");
                Ok(Arc::new(UnavailableClient))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_client_always_unavailable() {
        let client = UnavailableClient;
        for prompt in ["hello", "again", "and again"] {
            assert_eq!(client.complete(prompt).await, CompletionOutcome::Unavailable);
        }
        assert_eq!(client.name(), "unavailable");
    }
}
