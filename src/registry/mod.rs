//! RCN channel registries
//!
//! A Host registry owns the authoritative state for its channels and
//! answers every request with a Status Update. A Controller registry
//! keeps a cached mirror of a remote Host's channels and issues the
//! requests. Both gate every level change through a user-supplied
//! callback: the Host's update filter may veto or rewrite a change, the
//! Controller's update notifier merely observes it.

mod channel;
mod controller;
mod host;

pub use channel::{Channel, ChannelUpdate};
pub use controller::Controller;
pub use host::Host;
