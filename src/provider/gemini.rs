use super::client::CompletionClient;
use super::messages::{
    ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part,
};
use super::outcome::{CompletionOutcome, ProviderError};
use super::prompt::build_prompt;
use crate::config::ProviderConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Google Gemini `generateContent` client
pub struct GeminiClient {
    http: reqwest::Client,
    config: ProviderConfig,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: ProviderConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("chat-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            timeout: Duration::from_secs(config.timeout_secs),
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, question: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(question)),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        }
    }

    /// One HTTP round trip, no retries
    async fn generate(&self, question: &str) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request(question))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_api_error(status.as_u16(), &body));
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Gemini returned an undecodable body: {}", e);
                return Err(ProviderError::EmptyResponse);
            }
        };

        parsed.text().ok_or_else(|| {
            let finish_reason = parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            warn!(
                "Gemini returned an unexpected response format (finish reason: {})",
                finish_reason
            );
            ProviderError::EmptyResponse
        })
    }
}

#[async_trait::async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> CompletionOutcome {
        debug!("Calling Gemini ({} chars)", prompt.len());

        let result = match tokio::time::timeout(self.timeout, self.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };

        match result {
            Ok(text) => CompletionOutcome::Ok(text),
            Err(e) => {
                error!("Error calling Gemini API: {}", e);
                e.classify()
            }
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Turn a non-2xx response into a [`ProviderError::Api`], using the JSON
/// error envelope when the body carries one.
fn parse_api_error(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => ProviderError::Api {
            status,
            code: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => ProviderError::Api {
            status,
            code: None,
            message: body.trim().to_string(),
        },
    }
}
