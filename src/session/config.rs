use serde::{Deserialize, Serialize};

/// How a connection's messages are handed to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Every message gets its own provider call right away. Replies to
    /// overlapping messages may arrive out of order.
    #[default]
    Concurrent,
    /// One provider call at a time per connection, FIFO. Each echo is sent
    /// when its turn starts, so frames always alternate You/AI.
    Serialized,
}

/// Configuration for a connection session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Dispatch policy for provider calls
    pub dispatch: DispatchMode,

    /// Capacity of the outbound frame queue feeding the socket writer, and
    /// of the pending-message queue in serialized mode
    pub outbound_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchMode::Concurrent,
            outbound_buffer: 64,
        }
    }
}
