use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const WELCOME_TEXT: &str =
    "Welcome! You are connected to the chat. Type a message to talk to the AI.";

/// Frame sent by the browser for each user turn. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundFrame {
    #[serde(default)]
    pub message: Option<String>,
}

/// Who a frame is attributed to when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    System,
    You,
    #[serde(rename = "AI")]
    Ai,
}

/// Frame sent to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundFrame {
    pub sender: Sender,
    pub message: String,
}

impl OutboundFrame {
    pub fn welcome() -> Self {
        Self::system(WELCOME_TEXT)
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::System,
            message: message.into(),
        }
    }

    pub fn echo(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::You,
            message: message.into(),
        }
    }

    pub fn ai(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Inbound payload that could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid UTF-8")]
    NotUtf8,

    #[error("payload is not a message frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a text payload into the user's message.
///
/// `Ok(None)` means the frame was well formed but carried nothing to answer.
pub fn decode_inbound(payload: &str) -> Result<Option<String>, DecodeError> {
    let frame: InboundFrame = serde_json::from_str(payload)?;
    Ok(frame.message.filter(|m| !m.is_empty()))
}

/// Same as [`decode_inbound`] for binary payloads
pub fn decode_inbound_bytes(payload: &[u8]) -> Result<Option<String>, DecodeError> {
    let text = std::str::from_utf8(payload).map_err(|_| DecodeError::NotUtf8)?;
    decode_inbound(text)
}
