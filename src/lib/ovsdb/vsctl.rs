// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::process::Command;

use crate::{ErrorKind, OvnChassisError};

pub const EXTERNAL_IDS_SECTION: &str = "external_ids";
pub const OTHER_CONFIG_SECTION: &str = "other_config";

// `open` is the ovs-vsctl shorthand for the Open_vSwitch table, `.` its
// single row.
const GLOBAL_CONFIG_TABLE: &str = "open";
const GLOBAL_CONFIG_ROW: &str = ".";

const DEFAULT_BINARY: &str = "ovs-vsctl";
const DEFAULT_TIMEOUT: u32 = 60;

/// Narrow seam over the store mutation so resolve and merge logic stays
/// testable without spawning any process.
pub trait GlobalConfApplier {
    fn set_global_conf(
        &mut self,
        section: &str,
        conf: &BTreeMap<String, String>,
    ) -> Result<(), OvnChassisError>;
}

/// Blocking wrapper around the `ovs-vsctl` binary. Each call runs the
/// tool to completion, there is no retry and no read-back verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvsVsctl {
    binary: String,
    timeout: u32,
}

impl Default for OvsVsctl {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OvsVsctl {
    pub fn new(binary: &str, timeout: u32) -> Self {
        Self {
            binary: binary.to_string(),
            timeout,
        }
    }

    pub(crate) fn set_args(
        section: &str,
        conf: &BTreeMap<String, String>,
    ) -> Vec<String> {
        let mut args = vec![
            "set".to_string(),
            GLOBAL_CONFIG_TABLE.to_string(),
            GLOBAL_CONFIG_ROW.to_string(),
        ];
        for (key, value) in conf.iter() {
            args.push(format!("{section}:{key}={value}"));
        }
        args
    }

    /// The full command line for the given section, as it would be
    /// executed. Used by dry-run output. Arguments holding whitespace
    /// are single-quoted, the tool itself is invoked without a shell.
    pub fn set_command_line(
        &self,
        section: &str,
        conf: &BTreeMap<String, String>,
    ) -> String {
        let mut ret =
            vec![self.binary.clone(), format!("--timeout={}", self.timeout)];
        ret.extend(Self::set_args(section, conf));
        ret.into_iter()
            .map(|arg| {
                if arg.contains(char::is_whitespace) {
                    format!("'{arg}'")
                } else {
                    arg
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub(crate) fn run(
        &self,
        args: &[String],
    ) -> Result<String, OvnChassisError> {
        log::debug!(
            "Running {} --timeout={} {}",
            self.binary,
            self.timeout,
            args.join(" ")
        );
        let output = Command::new(&self.binary)
            .arg(format!("--timeout={}", self.timeout))
            .args(args)
            .output()
            .map_err(|e| {
                OvnChassisError::new(
                    ErrorKind::CommandFailure,
                    format!("Failed to execute {}: {e}", self.binary),
                )
            })?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let e = OvnChassisError::new(
                ErrorKind::CommandFailure,
                format!(
                    "Command `{} {}` failed with {}: {}",
                    self.binary,
                    args.join(" "),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            );
            log::error!("{}", e);
            Err(e)
        }
    }
}

impl GlobalConfApplier for OvsVsctl {
    fn set_global_conf(
        &mut self,
        section: &str,
        conf: &BTreeMap<String, String>,
    ) -> Result<(), OvnChassisError> {
        if conf.is_empty() {
            log::debug!("No {section} keys to set");
            return Ok(());
        }
        self.run(&Self::set_args(section, conf)).map(|_| ())
    }
}
