// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{ErrorKind, OvnChassisError, OvsDbGlobalConfig, OvsVsctl};

const COLUMNS: [&str; 2] = ["external_ids", "other_config"];

/// Current global config sections as stored by the switch daemon.
pub fn ovsdb_retrieve(
    cli: &OvsVsctl,
) -> Result<OvsDbGlobalConfig, OvnChassisError> {
    let args = vec![
        "--format=json".to_string(),
        format!("--columns={}", COLUMNS.join(",")),
        "list".to_string(),
        "Open_vSwitch".to_string(),
        ".".to_string(),
    ];
    let reply = cli.run(&args)?;
    parse_list_reply(&reply)
}

pub(crate) fn parse_list_reply(
    reply: &str,
) -> Result<OvsDbGlobalConfig, OvnChassisError> {
    let v: Value = serde_json::from_str(reply)?;
    let row = v
        .get("data")
        .and_then(|d| d.as_array())
        .and_then(|rows| rows.first())
        .and_then(|r| r.as_array())
        .ok_or_else(|| {
            OvnChassisError::new(
                ErrorKind::CommandFailure,
                format!("No data row in ovs-vsctl list reply: {reply}"),
            )
        })?;
    let mut ret = OvsDbGlobalConfig::default();
    if let Some(Value::Array(ids)) = row.first() {
        ret.external_ids = parse_str_map(ids);
    }
    if let Some(Value::Array(cfgs)) = row.get(1) {
        ret.other_config = parse_str_map(cfgs);
    }
    Ok(ret)
}

fn parse_str_map(v: &[Value]) -> BTreeMap<String, String> {
    let mut ret = BTreeMap::new();
    if let Some(Value::String(value_type)) = v.first() {
        match value_type.as_str() {
            "map" => {
                if let Some(kvs) = v.get(1).and_then(|i| i.as_array()) {
                    for kv in kvs {
                        if let Some(kv) = kv.as_array() {
                            if let (
                                Some(Value::String(k)),
                                Some(Value::String(v)),
                            ) = (kv.first(), kv.get(1))
                            {
                                ret.insert(k.to_string(), v.to_string());
                            }
                        }
                    }
                }
            }
            t => {
                log::warn!("Got unknown value type {t}: {v:?}");
            }
        }
    }
    ret
}
