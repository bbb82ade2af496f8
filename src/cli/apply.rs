// SPDX-License-Identifier: Apache-2.0

use std::convert::TryFrom;
use std::io::{stdin, Read};

use ovn_chassis::{
    ovsdb_apply, ChassisConfig, OvsDbGlobalConfig, OvsVsctl,
    EXTERNAL_IDS_SECTION, OTHER_CONFIG_SECTION,
};

use crate::{config::Config, error::CliError};

pub(crate) fn apply_from_stdin(
    matches: &clap::ArgMatches,
) -> Result<String, CliError> {
    apply(&mut stdin(), matches)
}

pub(crate) fn apply_from_files(
    file_paths: &[&str],
    matches: &clap::ArgMatches,
) -> Result<String, CliError> {
    let mut ret = String::new();
    for file_path in file_paths {
        ret += &apply(&mut std::fs::File::open(file_path)?, matches)?;
    }
    Ok(ret)
}

pub(crate) fn apply<R>(
    reader: &mut R,
    matches: &clap::ArgMatches,
) -> Result<String, CliError>
where
    R: Read,
{
    let config_path =
        match matches.try_get_one::<String>("CONFIG").unwrap_or_default() {
            Some(p) => p.as_str(),
            None => Config::DEFAULT_CONFIG_PATH,
        };
    let config = Config::load(config_path)?;

    let mut content = String::new();
    // Replace non-breaking space '\u{A0}'  to normal space
    reader.read_to_string(&mut content)?;
    let content = content.replace('\u{A0}', " ");

    let chassis_conf: ChassisConfig = serde_yaml::from_str(&content)?;
    let global_conf = OvsDbGlobalConfig::try_from(&chassis_conf)?;

    let mut cli =
        OvsVsctl::new(&config.apply.vsctl_binary, config.apply.timeout);

    if matches.try_contains_id("DRY_RUN").unwrap_or_default() {
        return Ok(format!(
            "{}\n{}\n",
            cli.set_command_line(
                EXTERNAL_IDS_SECTION,
                &global_conf.external_ids
            ),
            cli.set_command_line(
                OTHER_CONFIG_SECTION,
                &global_conf.other_config
            ),
        ));
    }

    ovsdb_apply(&global_conf, &mut cli)?;
    Ok(serde_yaml::to_string(&global_conf)?)
}
