//! lightsctl — drive notification LEDs, backlights and panel tuning through sysfs.

use std::path::PathBuf;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "lightsctl",
    version,
    about = "Control notification LEDs, backlights and display calibration"
)]
struct Args {
    /// Output as JSON (for types, set, apply, preview, calibration, cabc, config)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Resolve every sysfs path under this directory
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Log writes instead of touching any file
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "debug"
    } else if args.dry_run {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = cli::Options {
        json: args.json,
        config: args.config,
        root: args.root,
        dry_run: args.dry_run,
    };

    if let Err(e) = cli::run(args.command, &opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
