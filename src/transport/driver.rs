//! Radio driver contract
//!
//! The RCN engine never talks to radio hardware directly. It consumes a
//! narrow, non-blocking driver interface: an addressed byte frame with
//! driver-side CRC validation, a send-readiness check, and low-power
//! suspend/resume. The reference hardware is an RFM12B transceiver, but
//! anything satisfying [`RadioDriver`] works, including the simulated
//! links used in this crate's tests.

use std::fmt;

use bytes::Bytes;

/// Radio frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Band {
    /// 433 MHz ISM band
    Mhz433,
    /// 868 MHz ISM band
    Mhz868,
    /// 915 MHz ISM band
    Mhz915,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mhz = match self {
            Self::Mhz433 => 433,
            Self::Mhz868 => 868,
            Self::Mhz915 => 915,
        };
        write!(f, "{mhz}MHz")
    }
}

/// A frame handed up by the radio driver
#[derive(Debug, Clone)]
pub struct ReceivedFrame {
    /// Raw routing header byte
    pub header: u8,
    /// Frame payload (any length the radio accepted; the pump validates)
    pub payload: Bytes,
    /// Whether the driver's CRC check passed
    pub crc_ok: bool,
}

/// Non-blocking radio driver interface consumed by the transport pump
///
/// All methods must return promptly; the engine is polled at a short
/// interval and never blocks inside a driver call.
pub trait RadioDriver {
    /// One-time radio setup for the given node id, band, and net group
    fn configure(&mut self, node_id: u8, band: Band, group: u8);

    /// Check whether the radio can start a transmission right now
    fn can_send(&self) -> bool;

    /// Start a fire-and-forget transmission
    ///
    /// Only called after [`Self::can_send`] has returned true; the
    /// outcome of the transmission is not observable.
    fn send(&mut self, header: u8, payload: &[u8]);

    /// Check whether a frame has arrived since the last call
    fn receive_ready(&mut self) -> bool;

    /// Fetch the most recently arrived frame
    ///
    /// Only valid immediately after [`Self::receive_ready`] returned
    /// true.
    fn last_received(&mut self) -> ReceivedFrame;

    /// Suspend the radio subsystem (low-power mode)
    fn sleep(&mut self);

    /// Resume the radio subsystem after [`Self::sleep`]
    fn wake(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory driver for unit tests.

    use std::collections::VecDeque;

    use super::{Band, RadioDriver, ReceivedFrame};

    /// Records outbound frames and replays scripted inbound frames.
    #[derive(Debug, Default)]
    pub struct ScriptedRadio {
        pub can_send: bool,
        pub sent: Vec<(u8, Vec<u8>)>,
        pub inbox: VecDeque<ReceivedFrame>,
        pub asleep: bool,
        pub configured: Option<(u8, Band, u8)>,
    }

    impl ScriptedRadio {
        pub fn new() -> Self {
            Self {
                can_send: true,
                ..Self::default()
            }
        }
    }

    impl RadioDriver for ScriptedRadio {
        fn configure(&mut self, node_id: u8, band: Band, group: u8) {
            self.configured = Some((node_id, band, group));
        }

        fn can_send(&self) -> bool {
            self.can_send
        }

        fn send(&mut self, header: u8, payload: &[u8]) {
            self.sent.push((header, payload.to_vec()));
        }

        fn receive_ready(&mut self) -> bool {
            !self.inbox.is_empty()
        }

        fn last_received(&mut self) -> ReceivedFrame {
            self.inbox.pop_front().expect("receive_ready checked first")
        }

        fn sleep(&mut self) {
            self.asleep = true;
        }

        fn wake(&mut self) {
            self.asleep = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_display() {
        assert_eq!(Band::Mhz433.to_string(), "433MHz");
        assert_eq!(Band::Mhz868.to_string(), "868MHz");
        assert_eq!(Band::Mhz915.to_string(), "915MHz");
    }
}
