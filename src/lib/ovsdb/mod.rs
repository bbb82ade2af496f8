// SPDX-License-Identifier: Apache-2.0

pub(crate) mod apply;
pub(crate) mod global_conf;
pub(crate) mod show;
pub(crate) mod vsctl;

pub use self::apply::ovsdb_apply;
pub use self::global_conf::OvsDbGlobalConfig;
pub use self::show::ovsdb_retrieve;
pub use self::vsctl::{
    GlobalConfApplier, OvsVsctl, EXTERNAL_IDS_SECTION, OTHER_CONFIG_SECTION,
};
