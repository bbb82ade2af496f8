// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::{ChassisConfig, OvnChassisError};

const HOSTNAME_KEY: &str = "hostname";
const OVN_BRIDGE_KEY: &str = "ovn-bridge";
const OVN_BRIDGE_MAPPINGS_KEY: &str = "ovn-bridge-mappings";
const OVN_CHASSIS_MAC_MAPPINGS_KEY: &str = "ovn-chassis-mac-mappings";
const OVN_CMS_OPTIONS_KEY: &str = "ovn-cms-options";
const OVN_ENCAP_IP_KEY: &str = "ovn-encap-ip";
const OVN_ENCAP_TYPE_KEY: &str = "ovn-encap-type";
const OVN_MATCH_NORTHD_VERSION_KEY: &str = "ovn-match-northd-version";
const OVN_MONITOR_ALL_KEY: &str = "ovn-monitor-all";
const OVN_OFCTRL_WAIT_BEFORE_CLEAR_KEY: &str = "ovn-ofctrl-wait-before-clear";
const OVN_OPENFLOW_PROBE_INTERVAL_KEY: &str = "ovn-openflow-probe-interval";
const OVN_REMOTE_KEY: &str = "ovn-remote";
const OVN_REMOTE_PROBE_INTERVAL_KEY: &str = "ovn-remote-probe-interval";
const RUNDIR_KEY: &str = "rundir";

const HW_OFFLOAD_KEY: &str = "hw-offload";
const VLAN_LIMIT_KEY: &str = "vlan-limit";

const ENABLE_CHASSIS_AS_GW: &str = "enable-chassis-as-gw";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(deny_unknown_fields)]
/// The `external_ids` and `other_config` sections of the root
/// `Open_vSwitch` configuration object. BTreeMap keeps the rendering
/// order deterministic.
pub struct OvsDbGlobalConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub external_ids: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other_config: BTreeMap<String, String>,
}

impl OvsDbGlobalConfig {
    /// Conditionally extend both sections from the chassis feature
    /// flags. Last write wins on key collision, unrelated keys are
    /// preserved, re-merging with the same flags is a no-op.
    pub fn merge_feature_flags(&mut self, conf: &ChassisConfig) {
        if conf.dvr_enabled() {
            self.external_ids.insert(
                OVN_CMS_OPTIONS_KEY.to_string(),
                ENABLE_CHASSIS_AS_GW.to_string(),
            );
        }
        if conf.hw_offload_enabled() {
            self.other_config
                .insert(HW_OFFLOAD_KEY.to_string(), "true".to_string());
        }
    }
}

impl ChassisConfig {
    /// Resolve static defaults and computed values into the two global
    /// config sections, without feature-flag merging.
    pub fn to_global_conf(&self) -> Result<OvsDbGlobalConfig, OvnChassisError> {
        self.sanitize()?;
        let hostname = match self.hostname.as_ref() {
            Some(h) => h.clone(),
            None => crate::hostname::get_hostname()?,
        };

        let mut external_ids = BTreeMap::new();
        external_ids.insert(HOSTNAME_KEY.to_string(), hostname);
        external_ids
            .insert(OVN_BRIDGE_KEY.to_string(), self.bridge().to_string());
        external_ids.insert(
            OVN_BRIDGE_MAPPINGS_KEY.to_string(),
            self.bridge_mappings_value(),
        );
        external_ids.insert(
            OVN_ENCAP_IP_KEY.to_string(),
            self.ovn_encap_ip.clone().unwrap_or_default(),
        );
        external_ids.insert(
            OVN_ENCAP_TYPE_KEY.to_string(),
            self.encap_type().to_string(),
        );
        external_ids.insert(
            OVN_MATCH_NORTHD_VERSION_KEY.to_string(),
            self.match_northd_version().to_string(),
        );
        external_ids.insert(
            OVN_MONITOR_ALL_KEY.to_string(),
            self.monitor_all().to_string(),
        );
        external_ids.insert(
            OVN_OPENFLOW_PROBE_INTERVAL_KEY.to_string(),
            self.openflow_probe_interval().to_string(),
        );
        external_ids.insert(OVN_REMOTE_KEY.to_string(), self.ovn_remote());
        external_ids.insert(
            OVN_REMOTE_PROBE_INTERVAL_KEY.to_string(),
            self.remote_probe_interval().to_string(),
        );
        external_ids.insert(
            OVN_OFCTRL_WAIT_BEFORE_CLEAR_KEY.to_string(),
            self.ofctrl_wait_before_clear().to_string(),
        );
        external_ids
            .insert(RUNDIR_KEY.to_string(), self.rundir().to_string());
        if let Some(v) = self.chassis_mac_mappings_value() {
            external_ids.insert(OVN_CHASSIS_MAC_MAPPINGS_KEY.to_string(), v);
        }

        let mut other_config = BTreeMap::new();
        other_config.insert(VLAN_LIMIT_KEY.to_string(), "0".to_string());

        Ok(OvsDbGlobalConfig {
            external_ids,
            other_config,
        })
    }
}

impl TryFrom<&ChassisConfig> for OvsDbGlobalConfig {
    type Error = OvnChassisError;

    fn try_from(conf: &ChassisConfig) -> Result<Self, OvnChassisError> {
        let mut ret = conf.to_global_conf()?;
        ret.merge_feature_flags(conf);
        Ok(ret)
    }
}
