use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a connection session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Waiting for input
    Open,
    /// At least one provider call outstanding
    Processing,
    /// Transport gone; nothing more is sent
    Closed,
}

/// Statistics about a connection session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session identifier used in logs
    pub session_id: String,

    /// When the connection was accepted
    pub connected_at: DateTime<Utc>,

    /// Connection age in seconds
    pub duration_secs: f64,

    /// Inbound frames seen (text or binary)
    pub frames_received: u64,

    /// Inbound frames dropped (undecodable or empty)
    pub frames_dropped: u64,

    /// `AI` frames handed to the writer
    pub replies_sent: u64,

    /// Provider calls not yet settled
    pub in_flight: usize,

    pub state: SessionState,
}
