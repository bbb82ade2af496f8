// SPDX-License-Identifier: Apache-2.0

mod chassis;
mod error;
mod hostname;
mod ovsdb;

#[cfg(test)]
mod unit_tests;

pub use crate::chassis::{BridgeMapping, ChassisConfig};
pub use crate::error::{ErrorKind, OvnChassisError};
pub use crate::ovsdb::{
    ovsdb_apply, ovsdb_retrieve, GlobalConfApplier, OvsDbGlobalConfig,
    OvsVsctl, EXTERNAL_IDS_SECTION, OTHER_CONFIG_SECTION,
};
