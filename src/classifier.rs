//! Client-facing text for provider outcomes
//!
//! The strings below are part of the wire contract with existing clients
//! and must not change.

use crate::provider::CompletionOutcome;

pub const UNAVAILABLE_TEXT: &str =
    "AI service is currently unavailable. Please check the API key configuration.";
pub const MALFORMED_TEXT: &str = "Sorry, I could not get a response from the AI.";
pub const RATE_LIMITED_TEXT: &str =
    "⚠️ The AI service is temporarily unavailable due to usage limits. Please try again later.";
pub const AUTH_ERROR_TEXT: &str =
    "⚠️ There is a problem with the AI service configuration. Please contact the administrator.";
pub const UNKNOWN_ERROR_TEXT: &str = "An error occurred while getting the AI response.";

/// Map an outcome to the text sent in the `AI` frame.
///
/// Provider error detail never reaches the client.
pub fn to_client_text(outcome: CompletionOutcome) -> String {
    match outcome {
        CompletionOutcome::Ok(text) => text,
        CompletionOutcome::Unavailable => UNAVAILABLE_TEXT.to_string(),
        CompletionOutcome::Malformed => MALFORMED_TEXT.to_string(),
        CompletionOutcome::RateLimited => RATE_LIMITED_TEXT.to_string(),
        CompletionOutcome::AuthError => AUTH_ERROR_TEXT.to_string(),
        CompletionOutcome::Unknown(_) | CompletionOutcome::Timeout => {
            UNKNOWN_ERROR_TEXT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_texts() {
        assert_eq!(
            to_client_text(CompletionOutcome::Unavailable),
            "AI service is currently unavailable. Please check the API key configuration."
        );
        assert_eq!(
            to_client_text(CompletionOutcome::Malformed),
            "Sorry, I could not get a response from the AI."
        );
        assert_eq!(
            to_client_text(CompletionOutcome::RateLimited),
            "⚠️ The AI service is temporarily unavailable due to usage limits. Please try again later."
        );
        assert_eq!(
            to_client_text(CompletionOutcome::AuthError),
            "⚠️ There is a problem with the AI service configuration. Please contact the administrator."
        );
        assert_eq!(
            to_client_text(CompletionOutcome::Unknown("boom".to_string())),
            "An error occurred while getting the AI response."
        );
    }

    #[test]
    fn test_ok_passes_through_unmodified() {
        let text = "```rust\nfn main() {}\n```\n\nDone — *really*.";
        assert_eq!(to_client_text(CompletionOutcome::Ok(text.to_string())), text);
    }

    #[test]
    fn test_unknown_detail_is_not_leaked() {
        let text = to_client_text(CompletionOutcome::Unknown("secret stack trace".to_string()));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_timeout_uses_generic_text() {
        assert_eq!(to_client_text(CompletionOutcome::Timeout), UNKNOWN_ERROR_TEXT);
    }

    #[test]
    fn test_same_input_same_output() {
        let a = to_client_text(CompletionOutcome::RateLimited);
        let b = to_client_text(CompletionOutcome::RateLimited);
        assert_eq!(a, b);
    }
}
