//! VLAN ID type with validation.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 12-bit VLAN identifier (0-4095).
///
/// Unlike strict IEEE 802.1Q (which reserves 0 and 4095), the custom
/// tagging scheme used by this switch occupies the full width of the
/// TCI VID field, so every 12-bit value is accepted. In particular,
/// 0xfff appears on trunk links as the id of a frame that entered the
/// switch untagged (see [`VlanId::UNTAGGED_WIRE`]).
///
/// # Examples
///
/// ```
/// use vswitch_types::VlanId;
///
/// let vlan = VlanId::new(100).unwrap();
/// assert_eq!(vlan.as_u16(), 100);
///
/// assert!(VlanId::new(4096).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    /// Maximum valid VLAN ID (the VID field is 12 bits wide).
    pub const MAX: u16 = 0x0fff;

    /// The id carried on trunk links by frames that entered the switch
    /// untagged: the "no VLAN" sentinel truncated to the 12-bit field,
    /// which comes out as all ones.
    pub const UNTAGGED_WIRE: VlanId = VlanId(0x0fff);

    /// Creates a new VLAN ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not fit in 12 bits.
    pub const fn new(id: u16) -> Result<Self, ParseError> {
        if id <= Self::MAX {
            Ok(VlanId(id))
        } else {
            Err(ParseError::InvalidVlanId(id))
        }
    }

    /// Extracts the VLAN ID from a 16-bit TCI field, masking off the
    /// exit-id nibble in the top 4 bits.
    pub const fn from_tci(tci: u16) -> Self {
        VlanId(tci & Self::MAX)
    }

    /// Returns the VLAN ID as a u16.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VlanId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u16 = s
            .parse()
            .map_err(|_| ParseError::InvalidVlanId(u16::MAX))?;
        VlanId::new(id)
    }
}

impl TryFrom<u16> for VlanId {
    type Error = ParseError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        VlanId::new(id)
    }
}

impl From<VlanId> for u16 {
    fn from(vlan: VlanId) -> u16 {
        vlan.0
    }
}
