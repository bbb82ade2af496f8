// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, OvnChassisError};

pub(crate) fn get_hostname() -> Result<String, OvnChassisError> {
    match nix::unistd::gethostname() {
        Ok(name) => Ok(name.to_string_lossy().to_string()),
        Err(e) => {
            let e = OvnChassisError::new(
                ErrorKind::Bug,
                format!("Failed to query system hostname: {e}"),
            );
            log::error!("{}", e);
            Err(e)
        }
    }
}
