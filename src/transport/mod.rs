//! RCN transport: the radio driver contract, the bounded send queue, and
//! the per-node send/receive pump.

mod driver;
mod node;
mod queue;

pub use driver::{Band, RadioDriver, ReceivedFrame};
pub use node::{Node, NodeConfig};
pub use queue::SendQueue;

#[cfg(test)]
pub(crate) use driver::testing;

/// Default send queue capacity, in packets
pub const SEND_QUEUE_CAPACITY: usize = 16;
