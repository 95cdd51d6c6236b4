//! vswitchd - VLAN-aware Ethernet switch daemon.
//!
//! Wires the forwarding core from `vswitch-core` to a link layer and a
//! per-switch configuration file, and runs the sequential forwarding
//! event loop.

mod config;
mod daemon;

pub use config::{ConfigError, SwitchConfig};
pub use daemon::SwitchDaemon;
