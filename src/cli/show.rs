// SPDX-License-Identifier: Apache-2.0

use ovn_chassis::{ovsdb_retrieve, OvsVsctl};

use crate::{config::Config, error::CliError};

pub(crate) fn show(matches: &clap::ArgMatches) -> Result<String, CliError> {
    let config_path =
        match matches.try_get_one::<String>("CONFIG").unwrap_or_default() {
            Some(p) => p.as_str(),
            None => Config::DEFAULT_CONFIG_PATH,
        };
    let config = Config::load(config_path)?;
    let cli = OvsVsctl::new(&config.apply.vsctl_binary, config.apply.timeout);

    let global_conf = ovsdb_retrieve(&cli)?;
    Ok(if matches.is_present("JSON") {
        serde_json::to_string_pretty(&global_conf)?
    } else {
        serde_yaml::to_string(&global_conf)?
    })
}
