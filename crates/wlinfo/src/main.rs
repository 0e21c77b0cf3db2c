// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod config;
mod logging;
mod paths;
mod print;
mod run;
mod wayland;

use clap::Parser;

use crate::cli::Args;

fn main() {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| paths::default_log_path("wlinfo.log"));

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        eprintln!("wlinfo: failed to init logging: {e}");
        std::process::exit(1);
    }

    eventline::info!("wlinfo starting");
    eventline::debug!("verbose={}", args.verbose);
    eventline::debug!("log_path={}", log_path.display());

    if let Err(e) = run::run(args) {
        eventline::error!("fatal error: {e}");
        eprintln!("wlinfo: {e}");
        std::process::exit(1);
    }
}
