// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, OvnChassisError};

const DEFAULT_BRIDGE: &str = "br-int";
const DEFAULT_ENCAP_TYPE: &str = "geneve";
const DEFAULT_RUNDIR: &str = "/var/run/openvswitch";
const DEFAULT_SB_SERVER_PORT: u16 = 6642;
const DEFAULT_OPENFLOW_PROBE_INTERVAL: u32 = 60;
const DEFAULT_REMOTE_PROBE_INTERVAL: u32 = 60000;
const DEFAULT_OFCTRL_WAIT_BEFORE_CLEAR: u32 = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
/// Desired OVN controller configuration for this chassis. Example yaml
/// input:
/// ```yml
/// ---
/// ovn-encap-ip: 172.19.0.100
/// ovn-dbs:
///   - ovsdbserver-sb-0.internal
///   - ovsdbserver-sb-1.internal
/// ovn-bridge-mappings:
///   - physnet: datacentre
///     bridge: br-ex
/// enable-internal-tls: true
/// ```
/// Every unset option falls back to its chassis-wide default, except
/// `ovn-encap-ip` which is required.
pub struct ChassisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Hostname stored in `external_ids:hostname`. Defaults to the
    /// system hostname.
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_bridge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_bridge_mappings: Option<Vec<BridgeMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_chassis_mac_mappings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_encap_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_encap_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Ordered list of OVN southbound database hosts.
    pub ovn_dbs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_sb_server_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_openflow_probe_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_remote_probe_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_ofctrl_wait_before_clear: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_monitor_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovn_match_northd_version: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Distributed virtual routing. When enabled (the default), this
    /// chassis is allowed to act as a gateway.
    pub enable_dvr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_hw_offload: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_internal_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rundir: Option<String>,
}

impl ChassisConfig {
    const SEPARATOR: &'static str = ",";

    pub(crate) fn bridge(&self) -> &str {
        self.ovn_bridge.as_deref().unwrap_or(DEFAULT_BRIDGE)
    }

    pub(crate) fn encap_type(&self) -> &str {
        self.ovn_encap_type.as_deref().unwrap_or(DEFAULT_ENCAP_TYPE)
    }

    pub(crate) fn rundir(&self) -> &str {
        self.rundir.as_deref().unwrap_or(DEFAULT_RUNDIR)
    }

    pub(crate) fn sb_server_port(&self) -> u16 {
        self.ovn_sb_server_port.unwrap_or(DEFAULT_SB_SERVER_PORT)
    }

    pub(crate) fn openflow_probe_interval(&self) -> u32 {
        self.ovn_openflow_probe_interval
            .unwrap_or(DEFAULT_OPENFLOW_PROBE_INTERVAL)
    }

    pub(crate) fn remote_probe_interval(&self) -> u32 {
        self.ovn_remote_probe_interval
            .unwrap_or(DEFAULT_REMOTE_PROBE_INTERVAL)
    }

    pub(crate) fn ofctrl_wait_before_clear(&self) -> u32 {
        self.ovn_ofctrl_wait_before_clear
            .unwrap_or(DEFAULT_OFCTRL_WAIT_BEFORE_CLEAR)
    }

    pub(crate) fn monitor_all(&self) -> bool {
        self.ovn_monitor_all.unwrap_or(true)
    }

    pub(crate) fn match_northd_version(&self) -> bool {
        self.ovn_match_northd_version.unwrap_or(false)
    }

    pub(crate) fn dvr_enabled(&self) -> bool {
        self.enable_dvr.unwrap_or(true)
    }

    pub(crate) fn hw_offload_enabled(&self) -> bool {
        self.enable_hw_offload.unwrap_or(false)
    }

    pub(crate) fn protocol(&self) -> &'static str {
        if self.enable_internal_tls.unwrap_or(false) {
            "ssl"
        } else {
            "tcp"
        }
    }

    // One `{proto}:{host}:{port}` entry per southbound database host,
    // input order preserved. Empty host list renders the empty string.
    pub(crate) fn ovn_remote(&self) -> String {
        let proto = self.protocol();
        let port = self.sb_server_port();
        self.ovn_dbs
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|host| {
                if host.contains(':') && !host.starts_with('[') {
                    format!("{proto}:[{host}]:{port}")
                } else {
                    format!("{proto}:{host}:{port}")
                }
            })
            .collect::<Vec<String>>()
            .join(Self::SEPARATOR)
    }

    pub(crate) fn bridge_mappings_value(&self) -> String {
        self.ovn_bridge_mappings
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|map| map.to_string())
            .collect::<Vec<String>>()
            .join(Self::SEPARATOR)
    }

    pub(crate) fn chassis_mac_mappings_value(&self) -> Option<String> {
        let maps = self.ovn_chassis_mac_mappings.as_deref()?;
        if maps.is_empty() {
            None
        } else {
            Some(maps.join(Self::SEPARATOR))
        }
    }

    pub fn sanitize(&self) -> Result<(), OvnChassisError> {
        if self
            .ovn_encap_ip
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            return Err(OvnChassisError::new(
                ErrorKind::MissingVariable,
                "Required configuration `ovn-encap-ip` is not defined"
                    .to_string(),
            ));
        }
        self.sanitize_unique_physnet_keys()?;
        if let Some(maps) = self.ovn_bridge_mappings.as_deref() {
            for map in maps {
                map.sanitize()?;
            }
        }
        Ok(())
    }

    fn sanitize_unique_physnet_keys(&self) -> Result<(), OvnChassisError> {
        if let Some(maps) = self.ovn_bridge_mappings.as_deref() {
            let physnet_keys: Vec<&str> =
                maps.iter().map(|m| m.physnet.as_str()).collect();
            for map in maps {
                if physnet_keys
                    .iter()
                    .filter(|k| k == &&map.physnet.as_str())
                    .count()
                    > 1
                {
                    return Err(OvnChassisError::new(
                        ErrorKind::InvalidArgument,
                        format!(
                            "Found duplicate `physnet` key {}",
                            map.physnet
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
#[serde(deny_unknown_fields)]
/// Mapping of a provider network name to the local OVS bridge carrying
/// its traffic, rendered as `physnet:bridge` inside
/// `external_ids:ovn-bridge-mappings`.
pub struct BridgeMapping {
    pub physnet: String,
    pub bridge: String,
}

impl BridgeMapping {
    pub fn sanitize(&self) -> Result<(), OvnChassisError> {
        if self.physnet.is_empty() || self.bridge.is_empty() {
            return Err(OvnChassisError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Bridge mapping requires both `physnet` and `bridge` \
                    to be non-empty, got `{self}`"
                ),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for BridgeMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.physnet, self.bridge)
    }
}
