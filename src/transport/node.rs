//! Per-node transport context and send/receive pump
//!
//! [`Node`] is the explicit handle owning everything one RCN node needs
//! to talk to the network: its radio driver, its send queue, and its
//! addressing configuration. The registries ([`crate::Host`] and
//! [`crate::Controller`]) each wrap one `Node`.

use tracing::{debug, info, trace};

use super::SEND_QUEUE_CAPACITY;
use super::driver::{Band, RadioDriver};
use super::queue::SendQueue;
use crate::protocol::{
    DecodedPacket, decode, encode_broadcast, encode_directed_absolute, encode_directed_relative,
    encode_status_request,
};

/// Addressing and queue configuration for one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeConfig {
    /// This node's id on the net group (1..=30 on RFM12B hardware)
    pub node_id: u8,
    /// Radio frequency band
    pub band: Band,
    /// Net group shared by all nodes on this network
    pub group: u8,
    /// Send queue capacity in packets
    pub queue_capacity: usize,
}

impl NodeConfig {
    /// Create a configuration with the default send queue capacity
    #[must_use]
    pub fn new(node_id: u8, band: Band, group: u8) -> Self {
        Self {
            node_id,
            band,
            group,
            queue_capacity: SEND_QUEUE_CAPACITY,
        }
    }
}

/// One RCN node's transport state: driver, send queue, and configuration
#[derive(Debug)]
pub struct Node<D: RadioDriver> {
    driver: D,
    queue: SendQueue,
    config: NodeConfig,
}

impl<D: RadioDriver> Node<D> {
    /// Create a node, performing one-time radio setup
    pub fn new(mut driver: D, config: NodeConfig) -> Self {
        driver.configure(config.node_id, config.band, config.group);
        info!(
            version = crate::VERSION,
            group = config.group,
            node = config.node_id,
            band = %config.band,
            "initializing RCN node"
        );
        Self {
            driver,
            queue: SendQueue::new(config.queue_capacity),
            config,
        }
    }

    /// This node's id on the net group
    #[must_use]
    pub fn node_id(&self) -> u8 {
        self.config.node_id
    }

    /// Check whether any outbound packet is waiting in the send queue
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.queue.has_pending()
    }

    /// Number of send queue overrun events since construction
    #[must_use]
    pub fn overruns(&self) -> u64 {
        self.queue.overruns()
    }

    /// Enqueue a Status Update broadcast for the given channel
    pub fn send_status_update(&mut self, channel: u8, level: u8) {
        trace!(channel, level, "enqueue status update");
        self.queue
            .push(encode_broadcast(self.config.node_id, channel, level));
    }

    /// Enqueue an absolute Update Request directed at `host`
    pub fn send_update_request_abs(&mut self, host: u8, channel: u8, level: u8) {
        trace!(host, channel, level, "enqueue absolute update request");
        self.queue.push(encode_directed_absolute(host, channel, level));
    }

    /// Enqueue a relative Update Request directed at `host`
    pub fn send_update_request_rel(&mut self, host: u8, channel: u8, delta: i8) {
        trace!(host, channel, delta, "enqueue relative update request");
        self.queue.push(encode_directed_relative(host, channel, delta));
    }

    /// Enqueue a Status Request for `channel` at `host`
    pub fn send_status_request(&mut self, host: u8, channel: u8) {
        trace!(host, channel, "enqueue status request");
        self.queue.push(encode_status_request(host, channel));
    }

    /// Pump the transport once: at most one send, then at most one receive
    ///
    /// Sends the oldest pending packet if the driver is ready, then
    /// fetches an arrived frame if there is one, discarding it on a CRC
    /// failure or a wrong-sized payload. Never blocks, never retries.
    ///
    /// Returns the decoded frame, or `None` if nothing (valid) arrived
    /// this call.
    pub fn poll(&mut self) -> Option<DecodedPacket> {
        if self.queue.has_pending() && self.driver.can_send() {
            if let Some(packet) = self.queue.pop() {
                trace!(header = %packet.header, "sending packet");
                self.driver.send(packet.header.as_u8(), &packet.payload);
            }
        }

        if self.driver.receive_ready() {
            let frame = self.driver.last_received();
            if !frame.crc_ok {
                debug!("dropping received frame with CRC mismatch");
                return None;
            }
            match decode(frame.header, &frame.payload) {
                Ok(packet) => return Some(packet),
                Err(err) => {
                    debug!(error = %err, "dropping malformed frame");
                    return None;
                }
            }
        }
        None
    }

    #[cfg(test)]
    pub(crate) fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Suspend the radio subsystem
    pub fn sleep(&mut self) {
        debug!(node = self.config.node_id, "radio going to sleep");
        self.driver.sleep();
    }

    /// Resume the radio subsystem
    pub fn wake(&mut self) {
        debug!(node = self.config.node_id, "radio waking up");
        self.driver.wake();
    }
}
