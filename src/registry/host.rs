//! Host-side channel registry
//!
//! A Host owns the authoritative state for its channels. Every proposed
//! level change, local or from the network, is clamped into the
//! channel's range and then routed through the update filter, which has
//! the final say on the stored value. Every request is answered with a
//! Status Update broadcast, even when nothing changed: Controllers
//! count on that reply.

use tracing::{debug, trace};

use super::channel::{ChannelTable, ChannelUpdate, clamp_level};
use crate::protocol::{DecodedPacket, Result};
use crate::transport::{Node, RadioDriver};

/// Authoritative channel registry for one Host node
///
/// The update filter `F` receives every proposed change and returns the
/// level to actually store: `update.old_level` to reject the change,
/// `update.new_level` to accept it, or any other value within the
/// channel's range. Its return value is stored verbatim.
pub struct Host<D: RadioDriver, F> {
    node: Node<D>,
    filter: F,
    channels: ChannelTable,
}

impl<D, F> Host<D, F>
where
    D: RadioDriver,
    F: FnMut(&ChannelUpdate) -> u8,
{
    /// Create a Host registry holding up to `capacity` channels
    pub fn new(node: Node<D>, capacity: usize, filter: F) -> Self {
        Self {
            node,
            filter,
            channels: ChannelTable::new(capacity),
        }
    }

    /// Register a new channel, returning its id
    ///
    /// The initial level passes through the update filter like any other
    /// change, and a Status Update announcing the channel's level is
    /// broadcast immediately.
    pub fn register(&mut self, range: u8, initial_level: u8, data: u8) -> Result<u8> {
        let channel = self.channels.register(range, 0, data)?;
        self.set(channel, initial_level)?;
        Ok(channel)
    }

    /// Number of registered channels
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Current level of the given channel
    pub fn get(&self, channel: u8) -> Result<u8> {
        Ok(self.channels.get(channel)?.level)
    }

    /// Set the absolute level of the given channel
    ///
    /// Returns the level actually stored, as decided by the update
    /// filter.
    pub fn set(&mut self, channel: u8, value: u8) -> Result<u8> {
        self.apply(channel, i32::from(value))
    }

    /// Adjust the level of the given channel by a signed delta
    pub fn adjust(&mut self, channel: u8, delta: i16) -> Result<u8> {
        let level = i32::from(self.get(channel)?);
        self.apply(channel, level + i32::from(delta))
    }

    fn apply(&mut self, channel: u8, value: i32) -> Result<u8> {
        let cell = self.channels.get(channel)?;
        let update = ChannelUpdate {
            channel,
            range: cell.range,
            data: cell.data,
            old_level: cell.level,
            new_level: clamp_level(value, cell.range),
        };
        let stored = (self.filter)(&update);
        self.channels.get_mut(channel)?.level = stored;
        // Always reply, even when the level is unchanged: Controllers
        // rely on one Status Update per request.
        self.node.send_status_update(channel, stored);
        Ok(stored)
    }

    /// Pump the transport once and dispatch any arrived request
    ///
    /// Call this method often to keep things running smoothly.
    pub fn poll(&mut self) {
        let Some(packet) = self.node.poll() else {
            return;
        };
        self.dispatch(&packet);
    }

    fn dispatch(&mut self, packet: &DecodedPacket) {
        if !self.channels.contains(packet.channel()) {
            debug!(
                channel = packet.channel(),
                registered = self.channels.len(),
                "dropping request for unregistered channel"
            );
            return;
        }
        trace!(
            channel = packet.channel(),
            level = %packet.level(),
            "dispatching update request"
        );
        let result = if packet.is_relative() {
            self.adjust(packet.channel(), i16::from(packet.rel_level()))
        } else {
            self.set(packet.channel(), packet.abs_level())
        };
        if let Err(err) = result {
            debug!(error = %err, "dropping undispatchable request");
        }
    }

    /// Check whether any outbound packet is waiting to be sent
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.node.has_pending()
    }

    /// Access the underlying transport node
    #[must_use]
    pub fn node(&self) -> &Node<D> {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::protocol::Error;
    use crate::transport::testing::ScriptedRadio;
    use crate::transport::{Band, NodeConfig, ReceivedFrame};

    fn test_host<F>(capacity: usize, filter: F) -> Host<ScriptedRadio, F>
    where
        F: FnMut(&ChannelUpdate) -> u8,
    {
        let node = Node::new(ScriptedRadio::new(), NodeConfig::new(1, Band::Mhz868, 212));
        Host::new(node, capacity, filter)
    }

    /// Drain the send queue through the scripted driver and return the
    /// raw frames that went out.
    fn drain<F>(host: &mut Host<ScriptedRadio, F>) -> Vec<(u8, Vec<u8>)>
    where
        F: FnMut(&ChannelUpdate) -> u8,
    {
        while host.has_pending() {
            host.poll();
        }
        host.node.driver_mut().sent.drain(..).collect()
    }

    fn accept_all(update: &ChannelUpdate) -> u8 {
        update.new_level
    }

    fn reject_all(update: &ChannelUpdate) -> u8 {
        update.old_level
    }

    #[test]
    fn test_register_filters_initial_level_and_broadcasts() {
        let mut host = test_host(2, accept_all);
        let channel = host.register(100, 150, 0).unwrap();
        assert_eq!(channel, 0);
        assert_eq!(host.get(0).unwrap(), 100); // clamped to range

        let sent = drain(&mut host);
        assert_eq!(sent, vec![(0x01, vec![0x00, 100])]);
    }

    #[test]
    fn test_register_beyond_capacity_rejected() {
        let mut host = test_host(1, accept_all);
        host.register(0xFF, 0, 0).unwrap();
        let result = host.register(0xFF, 0, 0);
        assert_eq!(result, Err(Error::ChannelTableFull { capacity: 1 }));
    }

    #[test]
    fn test_set_clamps_to_range() {
        let mut host = test_host(1, accept_all);
        host.register(100, 50, 0).unwrap();

        assert_eq!(host.set(0, 150).unwrap(), 100);
        assert_eq!(host.get(0).unwrap(), 100);
    }

    #[test]
    fn test_reject_all_filter_keeps_old_level() {
        let mut host = test_host(1, reject_all);
        host.register(100, 50, 0).unwrap();
        assert_eq!(host.get(0).unwrap(), 0); // initial 50 was rejected too

        host.set(0, 75).unwrap();
        assert_eq!(host.get(0).unwrap(), 0);
    }

    #[test]
    fn test_adjust_delegates_to_filter() {
        let mut host = test_host(1, accept_all);
        host.register(100, 50, 0).unwrap();

        assert_eq!(host.adjust(0, 10).unwrap(), 60);
        assert_eq!(host.adjust(0, -200).unwrap(), 0);
        assert_eq!(host.adjust(0, 500).unwrap(), 100);
    }

    #[test]
    fn test_adjust_extreme_delta_saturates_at_range() {
        let mut host = test_host(1, accept_all);
        host.register(0xFF, 200, 0).unwrap();

        assert_eq!(host.adjust(0, i16::MAX).unwrap(), 0xFF);
        assert_eq!(host.adjust(0, i16::MIN).unwrap(), 0);
    }

    #[test]
    fn test_every_set_broadcasts_even_when_unchanged() {
        let mut host = test_host(1, accept_all);
        host.register(100, 50, 0).unwrap();
        drain(&mut host);

        host.set(0, 50).unwrap();
        host.set(0, 50).unwrap();
        host.adjust(0, 0).unwrap();

        let sent = drain(&mut host);
        assert_eq!(sent.len(), 3);
        for (header, payload) in sent {
            assert_eq!(header, 0x01);
            assert_eq!(payload, vec![0x00, 50]);
        }
    }

    #[test]
    fn test_filter_receives_all_five_fields() {
        let mut seen = Vec::new();
        let node = Node::new(ScriptedRadio::new(), NodeConfig::new(1, Band::Mhz868, 212));
        let mut host = Host::new(node, 1, |update: &ChannelUpdate| {
            seen.push(*update);
            update.new_level
        });
        host.register(100, 20, 7).unwrap();
        host.set(0, 30).unwrap();
        drop(host);

        assert_eq!(
            seen,
            vec![
                ChannelUpdate {
                    channel: 0,
                    range: 100,
                    data: 7,
                    old_level: 0,
                    new_level: 20
                },
                ChannelUpdate {
                    channel: 0,
                    range: 100,
                    data: 7,
                    old_level: 20,
                    new_level: 30
                },
            ]
        );
    }

    #[test]
    fn test_unknown_channel_errors() {
        let mut host = test_host(1, accept_all);
        assert!(matches!(host.get(0), Err(Error::UnknownChannel { .. })));
        assert!(matches!(host.set(0, 1), Err(Error::UnknownChannel { .. })));
        assert!(matches!(host.adjust(0, 1), Err(Error::UnknownChannel { .. })));
    }

    #[test]
    fn test_inbound_absolute_request_sets_level() {
        let mut host = test_host(1, accept_all);
        host.register(100, 50, 0).unwrap();
        drain(&mut host);

        // Directed absolute request from a controller: set channel 0 to 80.
        host.node.driver_mut().inbox.push_back(ReceivedFrame {
            header: 0x81,
            payload: Bytes::copy_from_slice(&[0x00, 80]),
            crc_ok: true,
        });
        host.poll();

        assert_eq!(host.get(0).unwrap(), 80);
        let sent = drain(&mut host);
        assert_eq!(sent, vec![(0x01, vec![0x00, 80])]);
    }

    #[test]
    fn test_inbound_status_request_replies_without_change() {
        let mut host = test_host(1, accept_all);
        host.register(100, 50, 0).unwrap();
        drain(&mut host);

        // Relative delta 0 is a pure status query, never a silent no-op.
        host.node.driver_mut().inbox.push_back(ReceivedFrame {
            header: 0x81,
            payload: Bytes::copy_from_slice(&[0x80, 0]),
            crc_ok: true,
        });
        host.poll();

        assert_eq!(host.get(0).unwrap(), 50);
        let sent = drain(&mut host);
        assert_eq!(sent, vec![(0x01, vec![0x00, 50])]);
    }

    #[test]
    fn test_inbound_unknown_channel_dropped() {
        let mut host = test_host(1, accept_all);
        host.register(100, 50, 0).unwrap();
        drain(&mut host);

        host.node.driver_mut().inbox.push_back(ReceivedFrame {
            header: 0x81,
            payload: Bytes::copy_from_slice(&[0x05, 80]),
            crc_ok: true,
        });
        host.poll();

        assert_eq!(host.get(0).unwrap(), 50);
        assert!(!host.has_pending());
    }
}
