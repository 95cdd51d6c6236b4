//! Per-switch configuration file loading.
//!
//! Format, one port per line after an optional leading priority:
//!
//! ```text
//! 32768
//! r-0    10
//! r-1    20
//! rr-0-1 T
//! ```
//!
//! `T` marks a trunk; a bare number is the access VLAN id. The leading
//! priority is a spanning-tree leftover of the format: it is parsed
//! and reported but otherwise unused, since this switch runs no STP.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use vswitch_core::{LinkLayer, PortTable};
use vswitch_types::{AdminState, PortId, PortRole};

/// Errors surfaced while loading or applying a switch configuration.
///
/// All of these are fatal at startup; none can occur once the event
/// loop is running.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A line is not `name ("T" | vlan-id)`.
    #[error("malformed config line {line_no}: {line:?}")]
    MalformedLine {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },

    /// The config names a port the link topology does not have.
    #[error("config references unknown port {0:?}")]
    UnknownPort(String),

    /// The link topology has a port the config does not cover.
    #[error("port {0:?} present in topology but not in config")]
    UnconfiguredPort(String),

    /// `--disable` names a port the topology does not have.
    #[error("cannot disable unknown port {0:?}")]
    UnknownDisabledPort(String),
}

/// Parsed contents of a per-switch config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchConfig {
    /// The leading priority value, if the file carries one.
    pub priority: Option<u16>,
    /// Port name to role, in file order.
    pub ports: Vec<(String, PortRole)>,
}

impl SwitchConfig {
    /// Loads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses config text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut priority = None;
        let mut ports = Vec::new();
        let mut first_content_line = true;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            if first_content_line {
                first_content_line = false;
                if tokens.len() == 1 {
                    if let Ok(value) = tokens[0].parse::<u16>() {
                        priority = Some(value);
                        continue;
                    }
                }
            }

            let [name, role_token] = tokens[..] else {
                return Err(ConfigError::MalformedLine {
                    line_no,
                    line: line.to_string(),
                });
            };
            let role: PortRole =
                role_token
                    .parse()
                    .map_err(|_| ConfigError::MalformedLine {
                        line_no,
                        line: line.to_string(),
                    })?;
            ports.push((name.to_string(), role));
        }

        Ok(SwitchConfig { priority, ports })
    }

    /// Returns the configured role for a port name.
    pub fn role_of(&self, name: &str) -> Option<PortRole> {
        self.ports
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, role)| *role)
    }

    /// Builds the dense port table by matching this config against the
    /// link topology.
    ///
    /// Every topology port must be configured and every configured
    /// port must exist in the topology; `disabled` names are marked
    /// administratively down and must exist too.
    pub fn build_port_table<L: LinkLayer>(
        &self,
        link: &L,
        disabled: &[String],
    ) -> Result<PortTable, ConfigError> {
        let mut table = PortTable::new();

        for i in 0..link.port_count() {
            let id = PortId::new(i as u16);
            // port_count and port_name come from the same topology.
            let name = link
                .port_name(id)
                .ok_or_else(|| ConfigError::UnconfiguredPort(format!("port {}", i)))?;
            let role = self
                .role_of(name)
                .ok_or_else(|| ConfigError::UnconfiguredPort(name.to_string()))?;
            let admin = if disabled.iter().any(|d| d == name) {
                warn!(port = name, "port administratively disabled");
                AdminState::Down
            } else {
                AdminState::Up
            };
            table.add(name, role, admin);
        }

        for (name, _) in &self.ports {
            if !table.iter().any(|p| &p.name == name) {
                return Err(ConfigError::UnknownPort(name.clone()));
            }
        }
        for name in disabled {
            if !table.iter().any(|p| &p.name == name) {
                return Err(ConfigError::UnknownDisabledPort(name.clone()));
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use vswitch_core::ChannelLink;
    use vswitch_types::VlanId;

    const SAMPLE: &str = "32768\nr-0    10\nr-1    20\nrr-0-1 T\n";

    fn vlan(id: u16) -> VlanId {
        VlanId::new(id).unwrap()
    }

    #[test]
    fn test_parse_with_priority() {
        let config = SwitchConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.priority, Some(32768));
        assert_eq!(
            config.ports,
            vec![
                ("r-0".to_string(), PortRole::Access(vlan(10))),
                ("r-1".to_string(), PortRole::Access(vlan(20))),
                ("rr-0-1".to_string(), PortRole::Trunk),
            ]
        );
    }

    #[test]
    fn test_parse_without_priority() {
        let config = SwitchConfig::parse("r-0 10\nrr-0-1 T\n").unwrap();
        assert_eq!(config.priority, None);
        assert_eq!(config.ports.len(), 2);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let config = SwitchConfig::parse("\n\nr-0 10\n\nrr-0-1 T\n").unwrap();
        assert_eq!(config.ports.len(), 2);
    }

    #[test]
    fn test_parse_malformed_line() {
        let err = SwitchConfig::parse("r-0 10\nr-1 trunk\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line_no: 2, .. }));

        let err = SwitchConfig::parse("r-0 10 extra\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line_no: 1, .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = SwitchConfig::load(file.path()).unwrap();
        assert_eq!(config.ports.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SwitchConfig::load(Path::new("/nonexistent/switch.cfg")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_build_port_table() {
        let config = SwitchConfig::parse(SAMPLE).unwrap();
        let (link, _handles) = ChannelLink::new(&["r-0", "r-1", "rr-0-1"]);

        let table = config.build_port_table(&link, &[]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.access_vlan(PortId::new(0)), Some(vlan(10)));
        assert!(table.is_trunk(PortId::new(2)));
        assert!(table.is_enabled(PortId::new(1)));
    }

    #[test]
    fn test_build_port_table_with_disabled() {
        let config = SwitchConfig::parse(SAMPLE).unwrap();
        let (link, _handles) = ChannelLink::new(&["r-0", "r-1", "rr-0-1"]);

        let table = config
            .build_port_table(&link, &["rr-0-1".to_string()])
            .unwrap();
        assert!(!table.is_enabled(PortId::new(2)));
        assert!(table.is_enabled(PortId::new(0)));
    }

    #[test]
    fn test_topology_port_missing_from_config() {
        let config = SwitchConfig::parse("r-0 10\n").unwrap();
        let (link, _handles) = ChannelLink::new(&["r-0", "r-1"]);

        let err = config.build_port_table(&link, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::UnconfiguredPort(name) if name == "r-1"));
    }

    #[test]
    fn test_config_port_missing_from_topology() {
        let config = SwitchConfig::parse("r-0 10\nghost T\n").unwrap();
        let (link, _handles) = ChannelLink::new(&["r-0"]);

        let err = config.build_port_table(&link, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPort(name) if name == "ghost"));
    }

    #[test]
    fn test_disable_unknown_port() {
        let config = SwitchConfig::parse("r-0 10\n").unwrap();
        let (link, _handles) = ChannelLink::new(&["r-0"]);

        let err = config
            .build_port_table(&link, &["ghost".to_string()])
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDisabledPort(name) if name == "ghost"));
    }
}
