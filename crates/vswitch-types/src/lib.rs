//! Common value types for the vswitch forwarding core.
//!
//! This crate provides type-safe representations of the network
//! primitives used throughout the switch:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`VlanId`]: 12-bit VLAN identifiers
//! - [`ExitId`]: the 4-bit nibble checksum embedded in the custom tag
//! - [`PortId`], [`PortRole`], [`AdminState`]: switch port identity and
//!   configuration

mod exit;
mod mac;
mod port;
mod vlan;

pub use exit::ExitId;
pub use mac::MacAddress;
pub use port::{AdminState, PortId, PortRole};
pub use vlan::VlanId;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid VLAN ID: {0} (must be 0-4095)")]
    InvalidVlanId(u16),

    #[error("invalid exit id: {0:#x} (must fit in 4 bits)")]
    InvalidExitId(u8),

    #[error("invalid port role: {0}")]
    InvalidPortRole(String),
}
