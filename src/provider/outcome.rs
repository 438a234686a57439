use thiserror::Error;

/// Result of one provider invocation, before any client-facing text is derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Provider produced text (already trimmed)
    Ok(String),
    /// Quota or rate limit exhausted
    RateLimited,
    /// Credential rejected by the provider
    AuthError,
    /// Response carried no extractable text
    Malformed,
    /// No credential was configured at startup
    Unavailable,
    /// Call did not settle before the configured deadline
    Timeout,
    /// Any other failure; the detail is for logs only
    Unknown(String),
}

impl CompletionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CompletionOutcome::Ok(_))
    }

    /// Short label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionOutcome::Ok(_) => "ok",
            CompletionOutcome::RateLimited => "rate_limited",
            CompletionOutcome::AuthError => "auth_error",
            CompletionOutcome::Malformed => "malformed",
            CompletionOutcome::Unavailable => "unavailable",
            CompletionOutcome::Timeout => "timeout",
            CompletionOutcome::Unknown(_) => "unknown",
        }
    }
}

/// Failure of a single provider request
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {message}")]
    Api {
        status: u16,
        /// Structured error status, e.g. `RESOURCE_EXHAUSTED`
        code: Option<String>,
        message: String,
    },

    #[error("provider response contained no text")]
    EmptyResponse,

    #[error("provider call exceeded {0:?}")]
    Timeout(std::time::Duration),
}

impl ProviderError {
    /// Map a request failure onto the outcome taxonomy.
    ///
    /// Structured fields (HTTP status, error status code) are checked first,
    /// then the message text. An invalid key comes back as a plain 400.
    pub fn classify(self) -> CompletionOutcome {
        match self {
            ProviderError::EmptyResponse => CompletionOutcome::Malformed,
            ProviderError::Timeout(_) => CompletionOutcome::Timeout,
            ProviderError::Api {
                status,
                code,
                message,
            } => {
                if let Some(outcome) = classify_structured(status, code.as_deref()) {
                    return outcome;
                }
                classify_message(&message).unwrap_or_else(|| {
                    CompletionOutcome::Unknown(format!("HTTP {status}: {message}"))
                })
            }
            ProviderError::Http(e) => {
                if let Some(outcome) = e
                    .status()
                    .and_then(|status| classify_structured(status.as_u16(), None))
                {
                    return outcome;
                }
                // Keep the endpoint URL out of the detail
                CompletionOutcome::Unknown(e.without_url().to_string())
            }
        }
    }
}

fn classify_structured(status: u16, code: Option<&str>) -> Option<CompletionOutcome> {
    match (status, code) {
        (429, _) | (_, Some("RESOURCE_EXHAUSTED")) => Some(CompletionOutcome::RateLimited),
        (401 | 403, _) | (_, Some("UNAUTHENTICATED" | "PERMISSION_DENIED")) => {
            Some(CompletionOutcome::AuthError)
        }
        _ => None,
    }
}

const RATE_LIMIT_MARKERS: &[&str] = &[
    "429",
    "quota",
    "rate limit",
    "rate-limit",
    "too many requests",
];
const AUTH_MARKERS: &[&str] = &[
    "api key",
    "api_key",
    "credential",
    "unauthenticated",
    "unauthorized",
];

// Fallback heuristic: rate-limit markers win over credential markers.
fn classify_message(message: &str) -> Option<CompletionOutcome> {
    let lower = message.to_lowercase();
    if RATE_LIMIT_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(CompletionOutcome::RateLimited);
    }
    if AUTH_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(CompletionOutcome::AuthError);
    }
    None
}
