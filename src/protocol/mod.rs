pub mod frames;

pub use frames::{
    decode_inbound, decode_inbound_bytes, DecodeError, InboundFrame, OutboundFrame, Sender,
    WELCOME_TEXT,
};
