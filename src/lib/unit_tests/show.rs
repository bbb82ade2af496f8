// SPDX-License-Identifier: Apache-2.0

use crate::ovsdb::show::parse_list_reply;

#[test]
fn test_parse_list_reply_maps_both_sections() {
    let reply = r#"{"data":[[["map",[["hostname","compute-0"],["ovn-bridge","br-int"]]],["map",[["vlan-limit","0"]]]]],"headings":["external_ids","other_config"]}"#;

    let conf = parse_list_reply(reply).unwrap();
    assert_eq!(
        conf.external_ids.get("hostname").map(String::as_str),
        Some("compute-0")
    );
    assert_eq!(
        conf.external_ids.get("ovn-bridge").map(String::as_str),
        Some("br-int")
    );
    assert_eq!(
        conf.other_config.get("vlan-limit").map(String::as_str),
        Some("0")
    );
}

#[test]
fn test_parse_list_reply_empty_maps() {
    let reply = r#"{"data":[[["map",[]],["map",[]]]],"headings":["external_ids","other_config"]}"#;

    let conf = parse_list_reply(reply).unwrap();
    assert!(conf.external_ids.is_empty());
    assert!(conf.other_config.is_empty());
}

#[test]
fn test_parse_list_reply_without_data_row_fails() {
    let reply = r#"{"data":[],"headings":["external_ids","other_config"]}"#;
    assert!(parse_list_reply(reply).is_err());
}

#[test]
fn test_parse_list_reply_invalid_json_fails() {
    assert!(parse_list_reply("ovs-vsctl: no response").is_err());
}
