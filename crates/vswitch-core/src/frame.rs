//! Ethernet frame codec with the custom 802.1Q-like VLAN tag.
//!
//! Wire layout of a tagged frame:
//!
//! ```text
//! | dst MAC (6) | src MAC (6) | TPID 0x8200 (2) | TCI (2) | ethertype (2) | payload |
//! ```
//!
//! The TCI carries the exit-id nibble in its top 4 bits and the 12-bit
//! VLAN id below it. An untagged frame has the real ethertype where the
//! TPID would be.

use byteorder::{BigEndian, ByteOrder};
use vswitch_types::{ExitId, MacAddress, VlanId};

use crate::error::FrameError;

/// TPID identifying the custom 802.1Q-like tag.
pub const VLAN_TPID: u16 = 0x8200;

/// On-wire size of the tag (2-byte TPID + 2-byte TCI).
pub const VLAN_TAG_LEN: usize = 4;

/// Length of an untagged Ethernet header.
pub const HEADER_LEN: usize = 14;

/// Length of a tagged Ethernet header.
pub const TAGGED_HEADER_LEN: usize = HEADER_LEN + VLAN_TAG_LEN;

/// The custom VLAN tag: exit-id nibble plus 12-bit VLAN id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlanTag {
    /// The 4-bit integrity nibble of the tagging access host.
    pub exit_id: ExitId,
    /// The 12-bit VLAN id.
    pub vlan_id: VlanId,
}

impl VlanTag {
    /// Creates a tag from its two fields.
    pub const fn new(exit_id: ExitId, vlan_id: VlanId) -> Self {
        VlanTag { exit_id, vlan_id }
    }

    /// Splits a TCI field into exit id and VLAN id.
    pub const fn from_tci(tci: u16) -> Self {
        VlanTag {
            exit_id: ExitId::from_tci(tci),
            vlan_id: VlanId::from_tci(tci),
        }
    }

    /// Packs the tag back into a TCI field.
    pub const fn tci(&self) -> u16 {
        ((self.exit_id.as_u4() as u16) << 12) | self.vlan_id.as_u16()
    }

    /// Encodes the full 4-byte tag, big-endian.
    pub fn encode(&self) -> [u8; VLAN_TAG_LEN] {
        let mut bytes = [0u8; VLAN_TAG_LEN];
        BigEndian::write_u16(&mut bytes[0..2], VLAN_TPID);
        BigEndian::write_u16(&mut bytes[2..4], self.tci());
        bytes
    }
}

/// A decoded Ethernet frame borrowing its payload from the raw buffer.
///
/// One instance exists per receive event; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetFrame<'a> {
    /// Destination MAC address.
    pub dst: MacAddress,
    /// Source MAC address.
    pub src: MacAddress,
    /// The true ethertype, read from after the tag when one is present.
    pub ethertype: u16,
    /// The custom VLAN tag, if the frame carried one.
    pub tag: Option<VlanTag>,
    /// Payload bytes following the (tagged or untagged) header.
    pub payload: &'a [u8],
}

impl<'a> EthernetFrame<'a> {
    /// Parses a raw frame.
    ///
    /// Reads the MAC pair, then the ethertype candidate; if the
    /// candidate is [`VLAN_TPID`] the following two bytes are the TCI
    /// and the true ethertype sits after them. Never reads out of
    /// bounds: a buffer too short for the header it implies yields
    /// [`FrameError::Truncated`].
    pub fn parse(buf: &'a [u8]) -> Result<Self, FrameError> {
        if buf.len() < HEADER_LEN {
            return Err(FrameError::truncated(buf.len(), HEADER_LEN));
        }

        let dst = MacAddress::new(buf[0..6].try_into().unwrap());
        let src = MacAddress::new(buf[6..12].try_into().unwrap());
        let candidate = BigEndian::read_u16(&buf[12..14]);

        if candidate != VLAN_TPID {
            return Ok(EthernetFrame {
                dst,
                src,
                ethertype: candidate,
                tag: None,
                payload: &buf[HEADER_LEN..],
            });
        }

        if buf.len() < TAGGED_HEADER_LEN {
            return Err(FrameError::truncated(buf.len(), TAGGED_HEADER_LEN));
        }

        let tci = BigEndian::read_u16(&buf[14..16]);
        let ethertype = BigEndian::read_u16(&buf[16..18]);

        Ok(EthernetFrame {
            dst,
            src,
            ethertype,
            tag: Some(VlanTag::from_tci(tci)),
            payload: &buf[TAGGED_HEADER_LEN..],
        })
    }

    /// Serializes an untagged frame.
    pub fn build_untagged(
        dst: MacAddress,
        src: MacAddress,
        ethertype: u16,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
        out.extend_from_slice(dst.as_bytes());
        out.extend_from_slice(src.as_bytes());
        out.extend_from_slice(&ethertype.to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    /// Serializes a tagged frame.
    pub fn build_tagged(
        dst: MacAddress,
        src: MacAddress,
        tag: VlanTag,
        ethertype: u16,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(TAGGED_HEADER_LEN + payload.len());
        out.extend_from_slice(dst.as_bytes());
        out.extend_from_slice(src.as_bytes());
        out.extend_from_slice(&tag.encode());
        out.extend_from_slice(&ethertype.to_be_bytes());
        out.extend_from_slice(payload);
        out
    }
}

/// Rewrites a frame's tagging for a given egress port role.
///
/// The four cases:
///
/// - trunk egress, untagged frame: insert a freshly built tag right
///   after the MAC pair (an untagged-on-trunk frame carries
///   [`VlanId::UNTAGGED_WIRE`] as its id);
/// - trunk egress, tagged frame: pass through unmodified;
/// - access egress, tagged frame: strip exactly the 4 tag bytes;
/// - access egress, untagged frame: pass through unmodified.
///
/// The original buffer is never mutated; the result is always a fresh
/// allocation.
pub fn rewrite_for_egress(
    raw: &[u8],
    frame: &EthernetFrame<'_>,
    egress_is_trunk: bool,
    vlan: Option<VlanId>,
    exit_id: ExitId,
) -> Vec<u8> {
    match (egress_is_trunk, frame.tag.is_some()) {
        (true, false) => {
            let tag = VlanTag::new(exit_id, vlan.unwrap_or(VlanId::UNTAGGED_WIRE));
            let mut out = Vec::with_capacity(raw.len() + VLAN_TAG_LEN);
            out.extend_from_slice(&raw[0..12]);
            out.extend_from_slice(&tag.encode());
            out.extend_from_slice(&raw[12..]);
            out
        }
        (false, true) => {
            let mut out = Vec::with_capacity(raw.len() - VLAN_TAG_LEN);
            out.extend_from_slice(&raw[0..12]);
            out.extend_from_slice(&raw[12 + VLAN_TAG_LEN..]);
            out
        }
        _ => raw.to_vec(),
    }
}
