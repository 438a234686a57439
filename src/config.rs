use anyhow::{Context, Result};
use serde::Deserialize;

use crate::session::SessionConfig;

/// Environment variables checked, in order, for the provider credential
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY", "OPENAI_API_KEY"];

/// Prefix for environment overrides, e.g. `CHAT_RELAY__SERVICE__HTTP__PORT=9100`
const ENV_PREFIX: &str = "CHAT_RELAY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub provider: ProviderConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub model: String,
    pub base_url: String,
    /// Explicit credential; when unset the environment is consulted
    #[serde(default)]
    pub api_key: Option<String>,
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// Deadline for a single provider call
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            max_output_tokens: 2048,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

impl ProviderConfig {
    /// Resolve the credential: config value first, then the environment.
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .into_iter()
            .chain(API_KEY_ENV_VARS.iter().filter_map(|name| lookup(name)))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

impl Config {
    /// Load configuration from defaults, an optional file, and `CHAT_RELAY__*`
    /// environment variables (later sources win).
    pub fn load(path: &str) -> Result<Self> {
        let defaults = ProviderConfig::default();

        let settings = config::Config::builder()
            .set_default("service.name", "chat-relay")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 9000)?
            .set_default("provider.model", defaults.model)?
            .set_default("provider.base_url", defaults.base_url)?
            .set_default(
                "provider.max_output_tokens",
                i64::from(defaults.max_output_tokens),
            )?
            .set_default("provider.temperature", f64::from(defaults.temperature))?
            .set_default("provider.timeout_secs", defaults.timeout_secs as i64)?
            .set_default("session.dispatch", "concurrent")?
            .set_default("session.outbound_buffer", 64)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_prefers_config() {
        let cfg = ProviderConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        let key = cfg.resolve_api_key_with(|_| Some("from-env".to_string()));
        assert_eq!(key.as_deref(), Some("from-config"));
    }

    #[test]
    fn test_resolve_api_key_env_order() {
        let cfg = ProviderConfig::default();
        let key = cfg.resolve_api_key_with(|name| match name {
            "GOOGLE_API_KEY" => Some("google".to_string()),
            "OPENAI_API_KEY" => Some("openai".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("google"));
    }

    #[test]
    fn test_resolve_api_key_skips_blank_values() {
        let cfg = ProviderConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        let key = cfg.resolve_api_key_with(|name| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "OPENAI_API_KEY" => Some(" last ".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("last"));
    }

    #[test]
    fn test_resolve_api_key_absent() {
        let cfg = ProviderConfig::default();
        assert_eq!(cfg.resolve_api_key_with(|_| None), None);
    }
}
