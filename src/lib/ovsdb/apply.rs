// SPDX-License-Identifier: Apache-2.0

use crate::{
    ovsdb::vsctl::{EXTERNAL_IDS_SECTION, OTHER_CONFIG_SECTION},
    GlobalConfApplier, OvnChassisError, OvsDbGlobalConfig,
};

/// Push both global config sections into the local store, `external_ids`
/// first. The two writes are independent invocations without
/// transactional coupling: when the second fails the first stays
/// applied.
pub fn ovsdb_apply(
    conf: &OvsDbGlobalConfig,
    cli: &mut dyn GlobalConfApplier,
) -> Result<(), OvnChassisError> {
    cli.set_global_conf(EXTERNAL_IDS_SECTION, &conf.external_ids)?;
    cli.set_global_conf(OTHER_CONFIG_SECTION, &conf.other_config)?;
    log::info!(
        "Applied {} external_ids and {} other_config keys",
        conf.external_ids.len(),
        conf.other_config.len()
    );
    Ok(())
}
