//! Connection session management
//!
//! This module provides the `ConnectionSession` abstraction that manages:
//! - Decoding inbound frames (malformed or empty ones are dropped)
//! - Echoing each user message before its reply
//! - Dispatching provider calls (concurrent or serialized per connection)
//! - Session statistics and state

mod config;
mod session;
mod stats;

pub use config::{DispatchMode, SessionConfig};
pub use session::ConnectionSession;
pub use stats::{SessionState, SessionStats};
