// SPDX-License-Identifier: Apache-2.0

mod apply;
mod config;
mod error;
mod service;
mod show;

use env_logger::Builder;
use log::LevelFilter;

use crate::error::CliError;

const APP_NAME: &str = "ovn-chassisctl";

const SUB_CMD_APPLY: &str = "apply";
const SUB_CMD_SHOW: &str = "show";
const SUB_CMD_SERVICE: &str = "service";
const SUB_CMD_VERSION: &str = "version";

fn app() -> clap::Command<'static> {
    clap::Command::new(APP_NAME)
        .version(clap::crate_version!())
        .about("Command line of OVN chassis configuration")
        .subcommand_required(true)
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Set verbose level")
                .global(true),
        )
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .help("Disable logging")
                .global(true),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_APPLY)
                .about(
                    "Apply chassis configuration to the local Open \
                    vSwitch database",
                )
                .alias("set")
                .arg(
                    clap::Arg::new("STATE_FILE")
                        .required(false)
                        .multiple_occurrences(true)
                        .index(1)
                        .help("Chassis configuration file"),
                )
                .arg(
                    clap::Arg::new("DRY_RUN")
                        .long("dry-run")
                        .takes_value(false)
                        .help(
                            "Print the ovs-vsctl command lines without \
                            executing them",
                        ),
                )
                .arg(
                    clap::Arg::new("CONFIG")
                        .long("config")
                        .takes_value(true)
                        .help("Tool configuration file"),
                ),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_SHOW)
                .about("Show current Open vSwitch global configuration")
                .arg(
                    clap::Arg::new("JSON")
                        .long("json")
                        .takes_value(false)
                        .help("Show state in json format"),
                )
                .arg(
                    clap::Arg::new("CONFIG")
                        .long("config")
                        .takes_value(true)
                        .help("Tool configuration file"),
                ),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_SERVICE)
                .about("Service mode: apply files from service folder")
                .arg(
                    clap::Arg::new(self::service::CONFIG_FOLDER_KEY)
                        .long("folder")
                        .short('f')
                        .required(false)
                        .takes_value(true)
                        .default_value(self::service::DEFAULT_SERVICE_FOLDER)
                        .help("Folder holding chassis configuration files"),
                )
                .arg(
                    clap::Arg::new("CONFIG")
                        .long("config")
                        .takes_value(true)
                        .help("Tool configuration file"),
                ),
        )
        .subcommand(clap::Command::new(SUB_CMD_VERSION).about("Show version"))
}

fn main() {
    let matches = app().get_matches();

    let (log_module_filters, log_level) =
        match matches.occurrences_of("verbose") {
            0 => (vec!["ovn_chassis", "ovn_chassisctl"], LevelFilter::Info),
            1 => (vec!["ovn_chassis", "ovn_chassisctl"], LevelFilter::Debug),
            _ => (vec![""], LevelFilter::Debug),
        };

    if !matches.is_present("quiet") {
        let mut log_builder = Builder::new();
        for log_module_filter in log_module_filters {
            if !log_module_filter.is_empty() {
                log_builder.filter(Some(log_module_filter), log_level);
            } else {
                log_builder.filter(None, log_level);
            }
        }
        log_builder.init();
    }

    if let Some(matches) = matches.subcommand_matches(SUB_CMD_APPLY) {
        if let Some(file_paths) = matches.values_of("STATE_FILE") {
            let file_paths: Vec<&str> = file_paths.collect();
            if file_paths.first() == Some(&"-") {
                print_result_and_exit(apply::apply_from_stdin(matches));
            } else {
                print_result_and_exit(apply::apply_from_files(
                    &file_paths,
                    matches,
                ));
            }
        } else {
            print_result_and_exit(apply::apply_from_stdin(matches));
        }
    } else if let Some(matches) = matches.subcommand_matches(SUB_CMD_SHOW) {
        print_result_and_exit(show::show(matches));
    } else if let Some(matches) = matches.subcommand_matches(SUB_CMD_SERVICE) {
        print_result_and_exit(self::service::ocl_service(matches));
    } else if matches.subcommand_matches(SUB_CMD_VERSION).is_some() {
        print_string_and_exit(format!(
            "{} {}",
            APP_NAME,
            clap::crate_version!()
        ));
    }
}

fn print_result_and_exit(result: Result<String, CliError>) {
    match result {
        Ok(s) => print_string_and_exit(s),
        Err(e) => print_error_and_exit(e),
    }
}

fn print_error_and_exit(e: CliError) {
    eprintln!("{}", e);
    std::process::exit(e.code);
}

fn print_string_and_exit(s: String) {
    println!("{}", s);
    std::process::exit(0);
}
