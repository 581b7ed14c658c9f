//! RCN routing header
//!
//! The header is a single byte shared with the radio driver's addressing
//! scheme.

use std::fmt;

use super::MAX_NODE_ID;

/// RCN routing header (1 byte)
///
/// # Wire Format
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |D|   Node ID   |
/// +-+-+-+-+-+-+-+-+
/// ```
///
/// When the directed bit `D` is set, the node id is the destination of
/// the frame (an Update Request aimed at a Host). When it is clear, the
/// frame is a broadcast and the node id is the source (a Status Update
/// from a Host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header(u8);

impl Header {
    /// Directed-frame bit
    const DIRECTED: u8 = 0x80;

    /// Create a directed header aimed at the given destination node
    #[must_use]
    pub const fn directed(dest_node: u8) -> Self {
        Self(Self::DIRECTED | (dest_node & MAX_NODE_ID))
    }

    /// Create a broadcast header originating from the given node
    #[must_use]
    pub const fn broadcast(src_node: u8) -> Self {
        Self(src_node & MAX_NODE_ID)
    }

    /// Reconstruct a header from its raw byte
    #[must_use]
    pub const fn from_u8(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw header byte, as handed to the radio driver
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Check whether this frame is directed at a single node
    #[must_use]
    pub const fn is_directed(self) -> bool {
        (self.0 & Self::DIRECTED) != 0
    }

    /// Check whether this frame is a broadcast
    #[must_use]
    pub const fn is_broadcast(self) -> bool {
        !self.is_directed()
    }

    /// Node id carried in the header (destination if directed, source if
    /// broadcast)
    #[must_use]
    pub const fn node(self) -> u8 {
        self.0 & MAX_NODE_ID
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_directed() {
            write!(f, "to node {}", self.node())
        } else {
            write!(f, "broadcast from node {}", self.node())
        }
    }
}
