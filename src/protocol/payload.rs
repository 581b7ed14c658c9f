//! RCN frame payload
//!
//! The payload is 2 bytes: a relative flag, a 7-bit channel id, and a
//! level byte whose interpretation depends on the flag.

use std::fmt;

use super::{Error, MAX_CHANNEL_ID, PAYLOAD_SIZE, Result};

/// A level value carried on the wire
///
/// Absolute levels are unsigned (a Status Update, or an absolute Update
/// Request). Relative levels are signed adjustments (a relative Update
/// Request). A relative adjustment of zero is a Status Request: it asks
/// for no change, but like every Update Request it obliges the Host to
/// answer with a Status Update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Absolute level value (0..=255)
    Absolute(u8),
    /// Relative level adjustment (-128..=127)
    Relative(i8),
}

impl Level {
    /// The level value encoding a Status Request
    pub const STATUS_REQUEST: Self = Self::Relative(0);

    /// Check whether this is a relative adjustment
    #[must_use]
    pub const fn is_relative(self) -> bool {
        matches!(self, Self::Relative(_))
    }

    /// Raw level byte as it appears on the wire
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Absolute(level) => level,
            Self::Relative(delta) => delta as u8,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(level) => write!(f, "{level}"),
            Self::Relative(delta) => write!(f, "{delta:+}"),
        }
    }
}

/// RCN frame payload (2 bytes)
///
/// # Wire Format
///
/// ```text
///  7 6 5 4 3 2 1 0   7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+ +-+-+-+-+-+-+-+-+
/// |R|  Channel ID | |     Level     |
/// +-+-+-+-+-+-+-+-+ +-+-+-+-+-+-+-+-+
/// ```
///
/// The level byte holds an unsigned absolute value when the relative
/// flag `R` is unset, or a two's-complement signed adjustment when it
/// is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload {
    /// Channel id (0..=127)
    pub channel: u8,
    /// Level value or adjustment
    pub level: Level,
}

impl Payload {
    /// Relative-flag bit in the first payload byte
    const RELATIVE: u8 = 0x80;

    /// Create a new payload
    #[must_use]
    pub const fn new(channel: u8, level: Level) -> Self {
        Self {
            channel: channel & MAX_CHANNEL_ID,
            level,
        }
    }

    /// Convert to wire bytes
    #[must_use]
    pub const fn to_bytes(self) -> [u8; PAYLOAD_SIZE] {
        let flag = if self.level.is_relative() {
            Self::RELATIVE
        } else {
            0
        };
        [flag | (self.channel & MAX_CHANNEL_ID), self.level.as_u8()]
    }

    /// Parse from wire bytes
    ///
    /// Any slice that is not exactly [`PAYLOAD_SIZE`] bytes is rejected;
    /// such frames must be discarded by the receiver.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PAYLOAD_SIZE {
            return Err(Error::InvalidPayloadLength {
                expected: PAYLOAD_SIZE,
                got: bytes.len(),
            });
        }
        let channel = bytes[0] & MAX_CHANNEL_ID;
        let level = if bytes[0] & Self::RELATIVE == 0 {
            Level::Absolute(bytes[1])
        } else {
            Level::Relative(bytes[1] as i8)
        };
        Ok(Self { channel, level })
    }
}
