//! Static per-port configuration table.
//!
//! Built once at startup from the validated switch configuration and
//! never mutated afterwards; the forwarding hot path indexes it by
//! [`PortId`] with no string lookups.

use vswitch_types::{AdminState, PortId, PortRole, VlanId};

/// Configuration of a single switch port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortConfig {
    /// Dense zero-based id, equal to this entry's table index.
    pub id: PortId,
    /// Human-readable interface name (e.g. "r-0", "rr-0-1").
    pub name: String,
    /// Trunk or access role.
    pub role: PortRole,
    /// Administrative state; `Down` ports neither accept nor emit
    /// frames.
    pub admin: AdminState,
}

/// Dense, immutable table of all switch ports.
#[derive(Debug, Clone, Default)]
pub struct PortTable {
    ports: Vec<PortConfig>,
}

impl PortTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        PortTable { ports: Vec::new() }
    }

    /// Appends a port, assigning it the next dense id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        role: PortRole,
        admin: AdminState,
    ) -> PortId {
        let id = PortId::new(self.ports.len() as u16);
        self.ports.push(PortConfig {
            id,
            name: name.into(),
            role,
            admin,
        });
        id
    }

    /// Looks up a port's configuration.
    pub fn get(&self, id: PortId) -> Option<&PortConfig> {
        self.ports.get(id.index())
    }

    /// Returns true if the port exists and is a trunk.
    pub fn is_trunk(&self, id: PortId) -> bool {
        self.get(id).is_some_and(|p| p.role.is_trunk())
    }

    /// Returns the access VLAN of a port, `None` for trunks and
    /// unknown ids.
    pub fn access_vlan(&self, id: PortId) -> Option<VlanId> {
        self.get(id).and_then(|p| p.role.access_vlan())
    }

    /// Returns true if the port exists and is administratively up.
    pub fn is_enabled(&self, id: PortId) -> bool {
        self.get(id).is_some_and(|p| p.admin.is_up())
    }

    /// Number of ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns true if the table has no ports.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Iterates over all port configurations in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PortConfig> {
        self.ports.iter()
    }

    /// Iterates over all port ids in order.
    pub fn ids(&self) -> impl Iterator<Item = PortId> + '_ {
        self.ports.iter().map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vlan(id: u16) -> VlanId {
        VlanId::new(id).unwrap()
    }

    fn sample_table() -> PortTable {
        let mut table = PortTable::new();
        table.add("r-0", PortRole::Access(vlan(10)), AdminState::Up);
        table.add("r-1", PortRole::Access(vlan(20)), AdminState::Up);
        table.add("rr-0-1", PortRole::Trunk, AdminState::Up);
        table.add("rr-0-2", PortRole::Trunk, AdminState::Down);
        table
    }

    #[test]
    fn test_dense_ids() {
        let table = sample_table();
        assert_eq!(table.len(), 4);
        for (i, port) in table.iter().enumerate() {
            assert_eq!(port.id.index(), i);
        }
    }

    #[test]
    fn test_role_lookups() {
        let table = sample_table();
        assert!(!table.is_trunk(PortId::new(0)));
        assert!(table.is_trunk(PortId::new(2)));
        assert_eq!(table.access_vlan(PortId::new(0)), Some(vlan(10)));
        assert_eq!(table.access_vlan(PortId::new(2)), None);
    }

    #[test]
    fn test_admin_state() {
        let table = sample_table();
        assert!(table.is_enabled(PortId::new(0)));
        assert!(!table.is_enabled(PortId::new(3)));
    }

    #[test]
    fn test_unknown_port() {
        let table = sample_table();
        let unknown = PortId::new(99);
        assert!(table.get(unknown).is_none());
        assert!(!table.is_trunk(unknown));
        assert!(table.access_vlan(unknown).is_none());
        assert!(!table.is_enabled(unknown));
    }

    #[test]
    fn test_names() {
        let table = sample_table();
        assert_eq!(table.get(PortId::new(2)).unwrap().name, "rr-0-1");
    }
}
