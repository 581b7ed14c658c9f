//! RCN error types

use thiserror::Error;

/// RCN protocol errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Received payload has the wrong length
    #[error("invalid payload length: expected {expected} bytes, got {got}")]
    InvalidPayloadLength {
        /// Required payload length
        expected: usize,
        /// Actual payload length
        got: usize,
    },

    /// Channel registry is at capacity
    #[error("channel table full: capacity {capacity} reached")]
    ChannelTableFull {
        /// Configured maximum channel count
        capacity: usize,
    },

    /// Channel id does not name a registered channel
    #[error("unknown channel {channel}: only {registered} channel(s) registered")]
    UnknownChannel {
        /// Offending channel id
        channel: u8,
        /// Number of registered channels
        registered: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
