use anyhow::{Context, Result};
use birdsite::build::build_site;
use birdsite::config::Config;
use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use std::path::Path;
use std::process;
use std::str::FromStr;

fn main() {
    let matches = App::new("birdsite")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("project")
                .help("The project directory, or any directory below it")
                .default_value("."),
        )
        .arg(
            Arg::with_name("force")
                .short("f")
                .long("force")
                .help("Overwrite pages that already exist"),
        )
        .arg(
            Arg::with_name("threads")
                .short("j")
                .long("threads")
                .takes_value(true)
                .help("The number of worker threads (defaults to the number of CPUs)"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .takes_value(true)
                .default_value("info")
                .help("One of off, error, warn, info, debug, trace"),
        )
        .get_matches();

    let level = matches.value_of("log-level").unwrap_or("info");
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'info' instead.", level);
        LevelFilter::Info
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    match run(&matches) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            log::error!("{:#}", err);
            process::exit(1);
        }
    }
}

// Returns whether every page was built.
fn run(matches: &ArgMatches) -> Result<bool> {
    let threads = match matches.value_of("threads") {
        Some(threads) => Some(
            threads
                .parse::<usize>()
                .with_context(|| format!("Invalid thread count `{}`", threads))?,
        ),
        None => None,
    };
    let project = Path::new(matches.value_of("project").unwrap_or("."));
    let config = Config::from_directory(project, matches.is_present("force"), threads)?;
    let report = build_site(&config)?;
    for failure in &report.failed {
        eprintln!("{}: {}", failure.descriptor, failure.error);
    }
    Ok(report.is_success())
}
