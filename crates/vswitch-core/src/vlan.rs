//! VLAN resolver: effective VLAN and exit id of an inbound frame.
//!
//! On a trunk the tag is authoritative; on an access port the port's
//! configuration is, regardless of anything the frame may claim.

use vswitch_types::{ExitId, MacAddress, PortRole, VlanId};

use crate::frame::VlanTag;

/// Resolves the VLAN an inbound frame belongs to.
///
/// Trunk ingress: the tag's VLAN id, or `None` when the frame arrived
/// untagged (such a frame has no VLAN membership; callers must not
/// expect access-port filtering to admit it anywhere).
///
/// Access ingress: the port's configured VLAN, always.
pub fn effective_vlan(ingress_role: PortRole, tag: Option<&VlanTag>) -> Option<VlanId> {
    match ingress_role {
        PortRole::Trunk => tag.map(|t| t.vlan_id),
        PortRole::Access(vlan) => Some(vlan),
    }
}

/// Resolves the exit id an inbound frame carries.
///
/// Trunk ingress: the nibble from the tag; an untagged trunk frame
/// falls back to recomputation from the source MAC. Access ingress:
/// always recomputed from the source MAC of the attached host.
pub fn effective_exit_id(
    ingress_role: PortRole,
    tag: Option<&VlanTag>,
    src: &MacAddress,
) -> ExitId {
    match (ingress_role, tag) {
        (PortRole::Trunk, Some(t)) => t.exit_id,
        _ => ExitId::of_mac(src),
    }
}
