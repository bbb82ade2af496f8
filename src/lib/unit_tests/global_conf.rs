// SPDX-License-Identifier: Apache-2.0

use std::convert::TryFrom;

use crate::{ChassisConfig, OvsDbGlobalConfig};

fn full_config() -> ChassisConfig {
    serde_yaml::from_str(
        r#"---
hostname: compute-0.localdomain
ovn-encap-ip: 172.19.0.100
ovn-dbs:
  - host-a
  - host-b
ovn-bridge-mappings:
  - physnet: datacentre
    bridge: br-ex
"#,
    )
    .unwrap()
}

#[test]
fn test_default_resolution_populates_all_external_ids_keys() {
    let conf = full_config();
    let global_conf = conf.to_global_conf().unwrap();

    let ids = &global_conf.external_ids;
    assert_eq!(
        ids.get("hostname").map(String::as_str),
        Some("compute-0.localdomain")
    );
    assert_eq!(ids.get("ovn-bridge").map(String::as_str), Some("br-int"));
    assert_eq!(
        ids.get("ovn-bridge-mappings").map(String::as_str),
        Some("datacentre:br-ex")
    );
    assert_eq!(
        ids.get("ovn-encap-ip").map(String::as_str),
        Some("172.19.0.100")
    );
    assert_eq!(
        ids.get("ovn-encap-type").map(String::as_str),
        Some("geneve")
    );
    assert_eq!(
        ids.get("ovn-match-northd-version").map(String::as_str),
        Some("false")
    );
    assert_eq!(
        ids.get("ovn-monitor-all").map(String::as_str),
        Some("true")
    );
    assert_eq!(
        ids.get("ovn-openflow-probe-interval").map(String::as_str),
        Some("60")
    );
    assert_eq!(
        ids.get("ovn-remote").map(String::as_str),
        Some("tcp:host-a:6642,tcp:host-b:6642")
    );
    assert_eq!(
        ids.get("ovn-remote-probe-interval").map(String::as_str),
        Some("60000")
    );
    assert_eq!(
        ids.get("ovn-ofctrl-wait-before-clear").map(String::as_str),
        Some("8000")
    );
    assert_eq!(
        ids.get("rundir").map(String::as_str),
        Some("/var/run/openvswitch")
    );
    assert_eq!(ids.len(), 12);
}

#[test]
fn test_default_other_config_is_vlan_limit_only() {
    let conf = full_config();
    let global_conf = conf.to_global_conf().unwrap();

    assert_eq!(
        global_conf.other_config.get("vlan-limit").map(String::as_str),
        Some("0")
    );
    assert_eq!(global_conf.other_config.len(), 1);
}

#[test]
fn test_dvr_enabled_by_default_merges_cms_options() {
    let conf = full_config();
    let global_conf = OvsDbGlobalConfig::try_from(&conf).unwrap();

    assert_eq!(
        global_conf.external_ids.get("ovn-cms-options").map(String::as_str),
        Some("enable-chassis-as-gw")
    );
}

#[test]
fn test_dvr_disabled_leaves_cms_options_absent() {
    let mut conf = full_config();
    conf.enable_dvr = Some(false);
    let global_conf = OvsDbGlobalConfig::try_from(&conf).unwrap();

    assert!(!global_conf.external_ids.contains_key("ovn-cms-options"));
}

#[test]
fn test_hw_offload_disabled_by_default() {
    let conf = full_config();
    let global_conf = OvsDbGlobalConfig::try_from(&conf).unwrap();

    assert!(!global_conf.other_config.contains_key("hw-offload"));
    assert_eq!(global_conf.other_config.len(), 1);
}

#[test]
fn test_hw_offload_enabled_merges_other_config_flag() {
    let mut conf = full_config();
    conf.enable_hw_offload = Some(true);
    let global_conf = OvsDbGlobalConfig::try_from(&conf).unwrap();

    assert_eq!(
        global_conf.other_config.get("hw-offload").map(String::as_str),
        Some("true")
    );
    assert_eq!(
        global_conf.other_config.get("vlan-limit").map(String::as_str),
        Some("0")
    );
}

#[test]
fn test_feature_flag_merge_is_idempotent() {
    let mut conf = full_config();
    conf.enable_hw_offload = Some(true);

    let merged_once = OvsDbGlobalConfig::try_from(&conf).unwrap();
    let mut merged_twice = merged_once.clone();
    merged_twice.merge_feature_flags(&conf);

    assert_eq!(merged_once, merged_twice);
}

#[test]
fn test_merge_preserves_unrelated_keys() {
    let conf = full_config();
    let mut global_conf = conf.to_global_conf().unwrap();
    let before: Vec<String> =
        global_conf.external_ids.keys().cloned().collect();

    global_conf.merge_feature_flags(&conf);

    for key in before {
        assert!(global_conf.external_ids.contains_key(&key));
    }
}

#[test]
fn test_tls_flag_changes_remote_protocol() {
    let mut conf = full_config();
    conf.enable_internal_tls = Some(true);
    let global_conf = conf.to_global_conf().unwrap();

    assert_eq!(
        global_conf.external_ids.get("ovn-remote").map(String::as_str),
        Some("ssl:host-a:6642,ssl:host-b:6642")
    );
}

#[test]
fn test_empty_db_list_renders_empty_remote() {
    let mut conf = full_config();
    conf.ovn_dbs = None;
    let global_conf = conf.to_global_conf().unwrap();

    assert_eq!(
        global_conf.external_ids.get("ovn-remote").map(String::as_str),
        Some("")
    );
}

#[test]
fn test_chassis_mac_mappings_rendered_only_when_set() {
    let conf = full_config();
    let global_conf = conf.to_global_conf().unwrap();
    assert!(!global_conf
        .external_ids
        .contains_key("ovn-chassis-mac-mappings"));

    let mut conf = full_config();
    conf.ovn_chassis_mac_mappings =
        Some(vec!["datacentre:1e:0a:bb:8a:31:01".to_string()]);
    let global_conf = conf.to_global_conf().unwrap();
    assert_eq!(
        global_conf
            .external_ids
            .get("ovn-chassis-mac-mappings")
            .map(String::as_str),
        Some("datacentre:1e:0a:bb:8a:31:01")
    );
}

#[test]
fn test_missing_encap_ip_aborts_resolution() {
    let conf: ChassisConfig = serde_yaml::from_str(
        r#"---
hostname: compute-0.localdomain
"#,
    )
    .unwrap();

    assert!(conf.to_global_conf().is_err());
}
