//! FDB: the MAC-address learning table.
//!
//! Maps each observed source MAC to the port it was last seen on. The
//! table is a best-effort optimization for unicast short-circuiting: a
//! stale entry only degrades delivery to flooding, never to
//! misdelivery, because flood admission is VLAN-filtered independently.

use std::collections::HashMap;

use tracing::trace;
use vswitch_types::{MacAddress, PortId};

/// Counters over the lifetime of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FdbStats {
    /// Distinct MAC addresses learned.
    pub entries_learned: u64,
    /// Entries that moved to a different port (station move or
    /// topology change).
    pub entries_moved: u64,
}

/// MAC-to-port learning table.
///
/// Owned by the forwarding engine; mutated only from its sequential
/// `process` call, so no internal locking is needed. A parallelized
/// ingress design would have to wrap it in a mutex or a single-writer
/// actor.
///
/// Entries never age out in this design.
#[derive(Debug, Clone, Default)]
pub struct FdbTable {
    entries: HashMap<MacAddress, PortId>,
    stats: FdbStats,
}

impl FdbTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        FdbTable::default()
    }

    /// Records that `mac` was observed on `port`.
    ///
    /// Unconditional overwrite: the most recent ingress port always
    /// wins.
    pub fn learn(&mut self, mac: MacAddress, port: PortId) {
        match self.entries.insert(mac, port) {
            None => {
                self.stats.entries_learned += 1;
                trace!(%mac, %port, "learned new FDB entry");
            }
            Some(previous) if previous != port => {
                self.stats.entries_moved += 1;
                trace!(%mac, from = %previous, to = %port, "FDB entry moved");
            }
            Some(_) => {}
        }
    }

    /// Returns the port `mac` was last learned on, if any.
    pub fn lookup(&self, mac: &MacAddress) -> Option<PortId> {
        self.entries.get(mac).copied()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> FdbStats {
        self.stats
    }
}
