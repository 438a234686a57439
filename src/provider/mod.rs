//! Text-generation provider access
//!
//! - `CompletionClient` trait shared by every connection
//! - Gemini `generateContent` implementation with a per-call deadline
//! - `CompletionOutcome` taxonomy and provider error classification

pub mod client;
pub mod gemini;
pub mod messages;
pub mod outcome;
pub mod prompt;

pub use client::{CompletionClient, CompletionClientFactory, UnavailableClient};
pub use gemini::GeminiClient;
pub use outcome::{CompletionOutcome, ProviderError};
