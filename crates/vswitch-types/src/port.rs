//! Switch port identity and configuration types.

use crate::{ParseError, VlanId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dense, zero-based switch port identifier.
///
/// Port ids index directly into the port table, so lookups on the
/// forwarding hot path never touch a string key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PortId(u16);

impl PortId {
    /// Creates a new port id.
    pub const fn new(id: u16) -> Self {
        PortId(id)
    }

    /// Returns the id as a table index.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the raw id.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for PortId {
    fn from(id: u16) -> Self {
        PortId(id)
    }
}

/// Role of a switch port in the VLAN scheme.
///
/// A trunk port carries tagged frames for all VLANs; an access port is
/// assigned to exactly one VLAN and its frames are untagged on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortRole {
    /// Trunk port: carries every VLAN, frames are tagged.
    Trunk,
    /// Access port: member of a single VLAN, frames are untagged.
    Access(VlanId),
}

impl PortRole {
    /// Returns true if this is a trunk port.
    pub const fn is_trunk(&self) -> bool {
        matches!(self, PortRole::Trunk)
    }

    /// Returns the configured access VLAN, or `None` for a trunk.
    pub const fn access_vlan(&self) -> Option<VlanId> {
        match self {
            PortRole::Trunk => None,
            PortRole::Access(vlan) => Some(*vlan),
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRole::Trunk => write!(f, "T"),
            PortRole::Access(vlan) => write!(f, "{}", vlan),
        }
    }
}

impl FromStr for PortRole {
    type Err = ParseError;

    /// Parses the config-file role token: `"T"` for trunk, a bare
    /// VLAN id for access.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "T" {
            return Ok(PortRole::Trunk);
        }
        let vlan: VlanId = s
            .parse()
            .map_err(|_| ParseError::InvalidPortRole(s.to_string()))?;
        Ok(PortRole::Access(vlan))
    }
}

/// Administrative state of a port.
///
/// Ports forward unless explicitly disabled, so the default is `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    /// Port participates in forwarding.
    #[default]
    Up,
    /// Port is administratively shut down: frames are neither accepted
    /// from it nor forwarded to it.
    Down,
}

impl AdminState {
    /// Returns true if the port is administratively up.
    pub const fn is_up(&self) -> bool {
        matches!(self, AdminState::Up)
    }

    /// Returns true if the port is administratively down.
    pub const fn is_down(&self) -> bool {
        matches!(self, AdminState::Down)
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminState::Up => write!(f, "up"),
            AdminState::Down => write!(f, "down"),
        }
    }
}
