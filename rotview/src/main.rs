use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod config;
mod display;
mod errors;
mod monitor;
mod repl;

use config::RotviewConfig;
use errors::RotviewErrors;
use repl::RotviewRepl;

/// Interactive viewer for one 3D rotation in five representations.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the one in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the status from a background thread whenever the rotation changes
    #[arg(long)]
    monitor: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), RotviewErrors> {
    let config = RotviewConfig::load(args.config.as_deref())?;
    log::debug!("{config:?}");

    let mut repl = RotviewRepl::new(config);
    if args.monitor {
        repl.start_monitor();
    }
    repl.run()
}
