//! RCN protocol core implementation
//!
//! This module provides the wire format, payload types, and codec for RCN.

mod codec;
mod error;
mod header;
mod payload;

pub use codec::{
    DecodedPacket, WirePacket, decode, encode_broadcast, encode_directed_absolute,
    encode_directed_relative, encode_status_request,
};
pub use error::{Error, Result};
pub use header::Header;
pub use payload::{Level, Payload};

/// Payload size in bytes; every valid RCN frame carries exactly this much
pub const PAYLOAD_SIZE: usize = 2;

/// Largest node id expressible in the 7-bit header field (id 0 is
/// reserved by convention)
pub const MAX_NODE_ID: u8 = 0x7F;

/// Largest channel id expressible in the 7-bit payload field
pub const MAX_CHANNEL_ID: u8 = 0x7F;
