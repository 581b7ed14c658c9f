//! Controller-side channel registry
//!
//! A Controller mirrors the channels of one remote Host. Local `set`
//! and `adjust` calls update the cache optimistically and send the
//! corresponding Update Request; the authoritative value arrives later
//! as a Status Update broadcast and overwrites the cache. Every cache
//! change, local or remote, is reported through the update notifier.

use tracing::{debug, trace};

use super::channel::{ChannelTable, ChannelUpdate, clamp_level};
use crate::protocol::{DecodedPacket, Result};
use crate::transport::{Node, RadioDriver};

/// Cached channel registry for one Controller node
///
/// The update notifier `F` observes every cache change. It is pure
/// notification and cannot veto a change; it should provide user
/// feedback (update a display, blink an LED) rather than trigger
/// further channel updates.
pub struct Controller<D: RadioDriver, F> {
    node: Node<D>,
    notifier: F,
    channels: ChannelTable,
    /// Node id of the remote Host owning the mirrored channels
    remote_host: u8,
}

impl<D, F> Controller<D, F>
where
    D: RadioDriver,
    F: FnMut(&ChannelUpdate),
{
    /// Create a Controller registry mirroring up to `capacity` channels
    /// of the Host at `remote_host`
    pub fn new(node: Node<D>, capacity: usize, remote_host: u8, notifier: F) -> Self {
        Self {
            node,
            notifier,
            channels: ChannelTable::new(capacity),
            remote_host,
        }
    }

    /// Register a new mirrored channel, returning its id
    ///
    /// The notifier observes the initial level, and a Status Request is
    /// sent immediately to fetch the remote Host's authoritative value.
    pub fn register(&mut self, range: u8, initial_level: u8, data: u8) -> Result<u8> {
        let channel = self.channels.register(range, 0, data)?;
        self.update(channel, i32::from(initial_level))?;
        self.sync(channel)?;
        Ok(channel)
    }

    /// Number of registered channels
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Cached level of the given channel
    ///
    /// May be stale until the next Status Update arrives.
    pub fn get(&self, channel: u8) -> Result<u8> {
        Ok(self.channels.get(channel)?.level)
    }

    /// Request a fresh Status Update for the given channel from the
    /// remote Host
    pub fn sync(&mut self, channel: u8) -> Result<()> {
        self.channels.get(channel)?;
        self.node.send_status_request(self.remote_host, channel);
        Ok(())
    }

    /// Set the absolute level of the given channel
    ///
    /// Updates the cache optimistically and sends an absolute Update
    /// Request carrying the clamped value to the remote Host.
    pub fn set(&mut self, channel: u8, value: u8) -> Result<u8> {
        let stored = self.update(channel, i32::from(value))?;
        self.node
            .send_update_request_abs(self.remote_host, channel, stored);
        Ok(stored)
    }

    /// Adjust the level of the given channel by a signed delta
    ///
    /// Updates the cache optimistically; a relative Update Request is
    /// sent only when the clamped delta is non-zero. A zero delta
    /// changes nothing and sends nothing (use [`Self::sync`] to query
    /// the remote Host).
    pub fn adjust(&mut self, channel: u8, delta: i16) -> Result<u8> {
        let delta = clamp_delta(delta);
        let level = i32::from(self.get(channel)?);
        let stored = self.update(channel, level + i32::from(delta))?;
        if delta != 0 {
            self.node
                .send_update_request_rel(self.remote_host, channel, delta);
        }
        Ok(stored)
    }

    /// Clamp `value` into the channel's range, notify, and store
    fn update(&mut self, channel: u8, value: i32) -> Result<u8> {
        let cell = self.channels.get(channel)?;
        let update = ChannelUpdate {
            channel,
            range: cell.range,
            data: cell.data,
            old_level: cell.level,
            new_level: clamp_level(value, cell.range),
        };
        (self.notifier)(&update);
        self.channels.get_mut(channel)?.level = update.new_level;
        Ok(update.new_level)
    }

    /// Pump the transport once and reconcile any arrived Status Update
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
                "dropping status update for unregistered channel"
            );
            return;
        }
        if packet.is_relative() {
            // Only Hosts ever receive relative requests.
            debug!(
                channel = packet.channel(),
                "dropping relative-flagged frame; status updates are absolute"
            );
            return;
        }
        trace!(
            channel = packet.channel(),
            level = packet.abs_level(),
            "reconciling cache with status update"
        );
        if let Err(err) = self.update(packet.channel(), i32::from(packet.abs_level())) {
            debug!(error = %err, "dropping unreconcilable status update");
        }
    }

    /// Suspend the node's radio participation
    pub fn sleep(&mut self) {
        self.node.sleep();
    }

    /// Resume the node's radio participation
    ///
    /// Pass `reset = true` to force every cached level to zero (through
    /// the notifier) while waiting for fresh Status Updates from the
    /// Host, so nothing acts on stale values right after waking.
    pub fn wake(&mut self, reset: bool) {
        self.node.wake();
        if reset {
            for channel in 0..self.channels.len() as u8 {
                let _ = self.update(channel, 0);
            }
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

fn clamp_delta(delta: i16) -> i8 {
    if delta < i16::from(i8::MIN) {
        i8::MIN
    } else if delta > i16::from(i8::MAX) {
        i8::MAX
    } else {
        delta as i8
    }
}
