//! The forwarding engine: per-frame output selection.
//!
//! Each inbound frame is processed to completion independently; the
//! only state carried across frames is the owned [`FdbTable`].

use tracing::debug;
use vswitch_types::{ExitId, PortId, VlanId};

use crate::error::FrameError;
use crate::fdb::FdbTable;
use crate::frame::{rewrite_for_egress, EthernetFrame};
use crate::ports::PortTable;
use crate::vlan::{effective_exit_id, effective_vlan};

/// A frame scheduled for transmission on one egress port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmit {
    /// Egress port.
    pub port: PortId,
    /// Rewritten frame bytes, tagged or untagged per the port's role.
    pub bytes: Vec<u8>,
}

/// How the candidate output set was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForwardMode {
    /// Single known destination port from the FDB; admission uses the
    /// extended (exit-id checked) VLAN test.
    KnownUnicast,
    /// All ports but the ingress; admission uses the basic VLAN test.
    Flood,
}

/// VLAN-aware forwarding engine.
///
/// Owns the immutable [`PortTable`] and the mutable [`FdbTable`]; the
/// learning table is encapsulated here rather than shared, so the
/// single sequential caller needs no locking.
#[derive(Debug)]
pub struct ForwardingEngine {
    ports: PortTable,
    fdb: FdbTable,
}

impl ForwardingEngine {
    /// Creates an engine over a fully built port table.
    pub fn new(ports: PortTable) -> Self {
        ForwardingEngine {
            ports,
            fdb: FdbTable::new(),
        }
    }

    /// The port table this engine forwards over.
    pub fn ports(&self) -> &PortTable {
        &self.ports
    }

    /// Read access to the learning table (stats, tests).
    pub fn fdb(&self) -> &FdbTable {
        &self.fdb
    }

    /// Processes one inbound frame and returns the transmissions it
    /// produces.
    ///
    /// A frame from an administratively down or unknown ingress port
    /// produces no output. A truncated frame yields an error the
    /// caller is expected to log and skip; it never aborts the loop.
    pub fn process(&mut self, ingress: PortId, raw: &[u8]) -> Result<Vec<Transmit>, FrameError> {
        if !self.ports.is_enabled(ingress) {
            debug!(%ingress, "dropping frame from disabled or unknown port");
            return Ok(Vec::new());
        }

        let frame = EthernetFrame::parse(raw)?;
        self.fdb.learn(frame.src, ingress);

        // is_enabled above guarantees the ingress entry exists.
        let ingress_role = self.ports.get(ingress).map(|p| p.role);
        let Some(ingress_role) = ingress_role else {
            return Ok(Vec::new());
        };

        let vlan = effective_vlan(ingress_role, frame.tag.as_ref());
        let exit_id = effective_exit_id(ingress_role, frame.tag.as_ref(), &frame.src);

        let (mode, candidates) = self.candidates(ingress, &frame);
        debug!(
            %ingress,
            dst = %frame.dst,
            src = %frame.src,
            ?mode,
            vlan = ?vlan.map(|v| v.as_u16()),
            %exit_id,
            "forwarding decision"
        );

        let mut out = Vec::new();
        for egress in candidates {
            if !self.ports.is_enabled(egress) {
                continue;
            }
            let admitted = match mode {
                ForwardMode::KnownUnicast => self.admit_extended(egress, vlan, exit_id, &frame),
                ForwardMode::Flood => self.admit_basic(egress, vlan),
            };
            if !admitted {
                continue;
            }
            let bytes =
                rewrite_for_egress(raw, &frame, self.ports.is_trunk(egress), vlan, exit_id);
            out.push(Transmit {
                port: egress,
                bytes,
            });
        }
        Ok(out)
    }

    /// Builds the candidate output set.
    ///
    /// A unicast destination with a learned port other than the
    /// ingress short-circuits to that single port; everything else
    /// (unknown unicast, multicast, broadcast, or an FDB hit equal to
    /// the ingress port) floods to all other ports.
    fn candidates(&self, ingress: PortId, frame: &EthernetFrame<'_>) -> (ForwardMode, Vec<PortId>) {
        if frame.dst.is_unicast() {
            if let Some(learned) = self.fdb.lookup(&frame.dst) {
                if learned != ingress {
                    return (ForwardMode::KnownUnicast, vec![learned]);
                }
            }
        }
        let flood = self.ports.ids().filter(|&p| p != ingress).collect();
        (ForwardMode::Flood, flood)
    }

    /// Basic VLAN membership test used when flooding: trunks carry all
    /// VLANs; an access port requires an exact VLAN match.
    fn admit_basic(&self, egress: PortId, vlan: Option<VlanId>) -> bool {
        if self.ports.is_trunk(egress) {
            return true;
        }
        self.ports.access_vlan(egress) == vlan && vlan.is_some()
    }

    /// Extended test for known unicast: on top of the basic VLAN
    /// match, an access destination's own MAC checksum must equal the
    /// exit id the frame carries, guarding against delivery to an
    /// access host whose address does not match the nibble that routed
    /// the frame there.
    fn admit_extended(
        &self,
        egress: PortId,
        vlan: Option<VlanId>,
        exit_id: ExitId,
        frame: &EthernetFrame<'_>,
    ) -> bool {
        if self.ports.is_trunk(egress) {
            return true;
        }
        if self.ports.access_vlan(egress) != vlan || vlan.is_none() {
            return false;
        }
        ExitId::of_mac(&frame.dst) == exit_id
    }
}
