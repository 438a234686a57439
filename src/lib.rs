pub mod classifier;
pub mod config;
pub mod http;
pub mod protocol;
pub mod provider;
pub mod server;
pub mod session;

pub use classifier::to_client_text;
pub use config::Config;
pub use http::{create_router, AppState};
pub use protocol::{InboundFrame, OutboundFrame, Sender};
pub use provider::{
    CompletionClient, CompletionClientFactory, CompletionOutcome, GeminiClient, ProviderError,
    UnavailableClient,
};
pub use server::RelayServer;
pub use session::{ConnectionSession, DispatchMode, SessionConfig, SessionState, SessionStats};
