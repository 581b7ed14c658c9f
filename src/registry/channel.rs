//! Channel cells and the bounded channel table shared by both registries

use crate::protocol::{Error, Result};

/// One addressable, range-bounded numeric setting
///
/// Invariant: `level <= range` after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    /// Inclusive upper bound of valid levels (0xFF allows the full byte)
    pub range: u8,
    /// Current level, always in `0..=range`
    pub level: u8,
    /// Opaque auxiliary byte carried through to callbacks (e.g. a
    /// hardware pin id)
    pub data: u8,
}

/// The five fields handed to update filters and notifiers on every
/// proposed level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelUpdate {
    /// Channel id
    pub channel: u8,
    /// Registered range for this channel
    pub range: u8,
    /// Auxiliary data for this channel
    pub data: u8,
    /// Current level before the change
    pub old_level: u8,
    /// Proposed level, already clamped into `0..=range`
    pub new_level: u8,
}

/// Clamp a computed level into `0..=range`
pub(crate) fn clamp_level(value: i32, range: u8) -> u8 {
    if value < 0 {
        0
    } else if value > i32::from(range) {
        range
    } else {
        // Fits in u8: 0 <= value <= range <= 255.
        value as u8
    }
}

/// Append-only channel storage validated against a fixed capacity
#[derive(Debug)]
pub(crate) struct ChannelTable {
    channels: Vec<Channel>,
    capacity: usize,
}

impl ChannelTable {
    pub(crate) fn new(capacity: usize) -> Self {
        // Channel ids must fit the 7-bit wire field.
        assert!(
            capacity <= usize::from(crate::protocol::MAX_CHANNEL_ID) + 1,
            "channel capacity exceeds the addressable channel id space"
        );
        Self {
            channels: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a channel, returning its id
    pub(crate) fn register(&mut self, range: u8, level: u8, data: u8) -> Result<u8> {
        if self.channels.len() >= self.capacity {
            return Err(Error::ChannelTableFull {
                capacity: self.capacity,
            });
        }
        let channel = self.channels.len() as u8;
        self.channels.push(Channel { range, level, data });
        Ok(channel)
    }

    pub(crate) fn len(&self) -> usize {
        self.channels.len()
    }

    pub(crate) fn contains(&self, channel: u8) -> bool {
        usize::from(channel) < self.channels.len()
    }

    pub(crate) fn get(&self, channel: u8) -> Result<&Channel> {
        self.channels
            .get(usize::from(channel))
            .ok_or(Error::UnknownChannel {
                channel,
                registered: self.channels.len(),
            })
    }

    pub(crate) fn get_mut(&mut self, channel: u8) -> Result<&mut Channel> {
        let registered = self.channels.len();
        self.channels
            .get_mut(usize::from(channel))
            .ok_or(Error::UnknownChannel {
                channel,
                registered,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(-1, 100), 0);
        assert_eq!(clamp_level(0, 100), 0);
        assert_eq!(clamp_level(50, 100), 50);
        assert_eq!(clamp_level(100, 100), 100);
        assert_eq!(clamp_level(101, 100), 100);
        assert_eq!(clamp_level(300, 0xFF), 0xFF);
        assert_eq!(clamp_level(-300, 0), 0);
        assert_eq!(clamp_level(i32::from(u8::MAX) + i32::from(i16::MAX), 0xFF), 0xFF);
        assert_eq!(clamp_level(i32::from(i16::MIN), 100), 0);
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut table = ChannelTable::new(3);
        assert_eq!(table.register(0xFF, 0, 0).unwrap(), 0);
        assert_eq!(table.register(100, 50, 7).unwrap(), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().data, 7);
    }

    #[test]
    fn test_register_rejects_beyond_capacity() {
        let mut table = ChannelTable::new(1);
        table.register(0xFF, 0, 0).unwrap();
        let result = table.register(0xFF, 0, 0);
        assert_eq!(result, Err(Error::ChannelTableFull { capacity: 1 }));
    }

    #[test]
    fn test_get_unknown_channel() {
        let table = ChannelTable::new(2);
        let result = table.get(0);
        assert_eq!(
            result,
            Err(Error::UnknownChannel {
                channel: 0,
                registered: 0
            })
        );
    }
}
