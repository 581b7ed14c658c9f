//! RCN frame codec (encode/decode)
//!
//! This module maps between logical messages (Status Update, Update
//! Request, Status Request) and the wire frames handed to the radio
//! driver.

use super::{Header, Level, PAYLOAD_SIZE, Payload, Result};

/// An encoded outbound frame: routing header plus fixed-size payload
///
/// This is the unit stored in the send queue and handed to the radio
/// driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WirePacket {
    /// Routing header byte
    pub header: Header,
    /// Encoded 2-byte payload
    pub payload: [u8; PAYLOAD_SIZE],
}

impl WirePacket {
    const fn new(header: Header, payload: Payload) -> Self {
        Self {
            header,
            payload: payload.to_bytes(),
        }
    }
}

/// Encode a Status Update: a broadcast from `own_node` reporting the
/// current absolute level of `channel`
#[must_use]
pub const fn encode_broadcast(own_node: u8, channel: u8, abs_level: u8) -> WirePacket {
    WirePacket::new(
        Header::broadcast(own_node),
        Payload::new(channel, Level::Absolute(abs_level)),
    )
}

/// Encode an absolute Update Request directed at `dest_node`
#[must_use]
pub const fn encode_directed_absolute(dest_node: u8, channel: u8, abs_level: u8) -> WirePacket {
    WirePacket::new(
        Header::directed(dest_node),
        Payload::new(channel, Level::Absolute(abs_level)),
    )
}

/// Encode a relative Update Request directed at `dest_node`
#[must_use]
pub const fn encode_directed_relative(dest_node: u8, channel: u8, delta: i8) -> WirePacket {
    WirePacket::new(
        Header::directed(dest_node),
        Payload::new(channel, Level::Relative(delta)),
    )
}

/// Encode a Status Request directed at `dest_node`
///
/// On the wire this is a relative Update Request with a delta of zero.
#[must_use]
pub const fn encode_status_request(dest_node: u8, channel: u8) -> WirePacket {
    encode_directed_relative(dest_node, channel, 0)
}

/// A successfully decoded inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedPacket {
    header: Header,
    payload: Payload,
}

impl DecodedPacket {
    /// Check whether the frame was a broadcast (a Status Update)
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        self.header.is_broadcast()
    }

    /// Node id from the routing header: the destination for a directed
    /// frame, the source for a broadcast
    #[must_use]
    pub const fn node(&self) -> u8 {
        self.header.node()
    }

    /// Channel id the frame refers to
    #[must_use]
    pub const fn channel(&self) -> u8 {
        self.payload.channel
    }

    /// Check whether the frame carries a relative adjustment
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.payload.level.is_relative()
    }

    /// Level value carried by the frame
    #[must_use]
    pub const fn level(&self) -> Level {
        self.payload.level
    }

    /// Absolute level; only meaningful when [`Self::is_relative`] is false
    #[must_use]
    pub const fn abs_level(&self) -> u8 {
        self.payload.level.as_u8()
    }

    /// Relative adjustment; only meaningful when [`Self::is_relative`] is true
    #[must_use]
    pub const fn rel_level(&self) -> i8 {
        self.payload.level.as_u8() as i8
    }
}

/// Decode a received frame from its raw header byte and payload bytes
///
/// # Errors
///
/// Returns an error if the payload is not exactly 2 bytes. Receivers
/// must discard such frames.
pub fn decode(raw_header: u8, payload_bytes: &[u8]) -> Result<DecodedPacket> {
    let payload = Payload::from_bytes(payload_bytes)?;
    Ok(DecodedPacket {
        header: Header::from_u8(raw_header),
        payload,
    })
}
