use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

use refsub::cli;
use refsub::consts;

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Prepare small synthetic genomics test fixtures from large public reference datasets.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose mode (-v, -vv, ...)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Silence all logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(cli::create_download_cli())
        .subcommand(cli::create_subsample_cli())
}

fn setup_logger(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        log::LevelFilter::Off
    } else {
        match matches.get_count("verbose") {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new().filter_level(level).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    setup_logger(&matches);

    match matches.subcommand() {
        Some((consts::DOWNLOAD_CMD, matches)) => cli::handlers::run_download(matches)?,
        Some((consts::SUBSAMPLE_CMD, matches)) => cli::handlers::run_subsample(matches)?,
        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
