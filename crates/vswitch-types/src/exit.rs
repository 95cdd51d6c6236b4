//! Exit id: the 4-bit MAC nibble checksum embedded in the custom tag.

use crate::{MacAddress, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 4-bit checksum derived from a MAC address.
///
/// The exit id is the sum of the high and low nibbles of every byte of
/// a MAC address, taken modulo 16. It rides in the top 4 bits of the
/// custom tag's TCI field and disambiguates which access host within a
/// VLAN a known-unicast frame should reach.
///
/// # Examples
///
/// ```
/// use vswitch_types::{ExitId, MacAddress};
///
/// let mac: MacAddress = "02:00:00:00:00:01".parse().unwrap();
/// assert_eq!(ExitId::of_mac(&mac).as_u4(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ExitId(u8);

impl ExitId {
    /// Creates an exit id from a value already known to be a nibble.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not fit in 4 bits.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value <= 0x0f {
            Ok(ExitId(value))
        } else {
            Err(ParseError::InvalidExitId(value))
        }
    }

    /// Extracts the exit id from a 16-bit TCI field (top 4 bits).
    pub const fn from_tci(tci: u16) -> Self {
        ExitId(((tci >> 12) & 0x0f) as u8)
    }

    /// Computes the exit id of a MAC address.
    ///
    /// Sums every nibble of the six address bytes in an 8-bit
    /// accumulator (wraparound on overflow is part of the checksum
    /// definition) and keeps the low 4 bits.
    pub fn of_mac(mac: &MacAddress) -> Self {
        let mut acc: u8 = 0;
        for byte in mac.as_bytes() {
            acc = acc.wrapping_add(byte >> 4);
            acc = acc.wrapping_add(byte & 0x0f);
        }
        ExitId(acc & 0x0f)
    }

    /// Returns the nibble value.
    pub const fn as_u4(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ExitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for ExitId {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ExitId::new(value)
    }
}

impl From<ExitId> for u8 {
    fn from(id: ExitId) -> u8 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_of_mac_reference_value() {
        // Nibbles 0,2,0,0,0,0,0,0,0,0,0,1 sum to 3.
        let mac: MacAddress = "02:00:00:00:00:01".parse().unwrap();
        assert_eq!(ExitId::of_mac(&mac).as_u4(), 3);
    }

    #[test]
    fn test_of_mac_deterministic() {
        let mac: MacAddress = "de:ad:be:ef:00:42".parse().unwrap();
        assert_eq!(ExitId::of_mac(&mac), ExitId::of_mac(&mac));
    }

    #[test]
    fn test_of_mac_broadcast() {
        // 12 nibbles of 0xf sum to 180; 180 mod 16 = 4.
        assert_eq!(ExitId::of_mac(&MacAddress::BROADCAST).as_u4(), 4);
    }

    #[test]
    fn test_from_tci() {
        assert_eq!(ExitId::from_tci(0x3007).as_u4(), 3);
        assert_eq!(ExitId::from_tci(0x0fff).as_u4(), 0);
    }

    #[test]
    fn test_new_bounds() {
        assert!(ExitId::new(0x0f).is_ok());
        assert!(ExitId::new(0x10).is_err());
    }
}
