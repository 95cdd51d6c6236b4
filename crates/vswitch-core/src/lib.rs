//! vswitch-core - the forwarding core of a VLAN-aware Ethernet switch.
//!
//! Given a raw frame arriving on one port, this crate decides which
//! other port(s) it must be replayed on, respecting VLAN isolation and
//! the custom 802.1Q-like tagging scheme with its embedded exit-id
//! nibble:
//!
//! - [`frame`]: Ethernet frame codec and tag rewriting
//! - [`ports`]: the static per-port configuration table
//! - [`fdb`]: the MAC learning table
//! - [`vlan`]: effective VLAN / exit-id resolution
//! - [`engine`]: the forwarding decision algorithm
//! - [`link`]: the receive/transmit capability the core consumes
//!
//! Data flow per frame: raw bytes → [`frame::EthernetFrame::parse`] →
//! [`fdb::FdbTable::learn`] → [`vlan`] resolution →
//! [`engine::ForwardingEngine::process`] output selection →
//! [`frame::rewrite_for_egress`] per egress role → transmit.

pub mod engine;
pub mod error;
pub mod fdb;
pub mod frame;
pub mod link;
pub mod ports;
pub mod vlan;

pub use engine::{ForwardingEngine, Transmit};
pub use error::FrameError;
pub use fdb::{FdbStats, FdbTable};
pub use frame::{EthernetFrame, VlanTag, VLAN_TAG_LEN, VLAN_TPID};
pub use link::{ChannelLink, LinkLayer, PortHandle};
pub use ports::{PortConfig, PortTable};
