//! RCN (Remote Control Network) - control protocol for radio-linked nodes
//!
//! This library implements the RCN protocol engine: a network of "Hosts"
//! owning range-bounded numeric settings ("Channels"), and battery-powered
//! "Controllers" that query and adjust those settings across a shared
//! low-bandwidth radio link.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rcn::{Band, Host, Node, NodeConfig, RadioDriver};
//!
//! fn serve<D: RadioDriver>(driver: D) -> rcn::Result<()> {
//!     let config = NodeConfig::new(1, Band::Mhz868, 212);
//!     let node = Node::new(driver, config);
//!     // Accept every proposed level as-is.
//!     let mut host = Host::new(node, 4, |update| update.new_level);
//!     host.register(100, 50, 0)?;
//!     loop {
//!         host.poll();
//!     }
//! }
//! ```
//!
//! # Protocol
//!
//! Every RCN frame is a routing header byte plus a 2-byte payload. A
//! directed frame is an Update Request (absolute or relative) from a
//! Controller to a Host; a broadcast frame is a Status Update from a
//! Host. A Status Request is simply an Update Request with a relative
//! adjustment of zero: it changes nothing, but the Host still answers
//! with a Status Update, as it does for every request.
//!
//! The engine is single-threaded and non-blocking: the embedding
//! application polls each node at a short interval, and each poll moves
//! at most one frame in each direction.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod registry;
pub mod transport;

pub use protocol::{
    DecodedPacket, Error, Header, Level, MAX_CHANNEL_ID, MAX_NODE_ID, PAYLOAD_SIZE, Payload,
    Result, WirePacket,
};
pub use registry::{Channel, ChannelUpdate, Controller, Host};
pub use transport::{Band, Node, NodeConfig, RadioDriver, ReceivedFrame, SendQueue};

/// RCN protocol version
pub const VERSION: u16 = 1;
