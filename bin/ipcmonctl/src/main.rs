//! ---
//! ipcmon_section: "05-control-cli"
//! ipcmon_subsection: "binary"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Control CLI driving the simulator without a terminal UI."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use ipcmon_common::config::{AppConfig, DEFAULT_CONFIG_CANDIDATES};
use ipcmon_common::version::VersionInfo;
use ipcmon_common::init_tracing;

mod commands;
mod headless;

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "IPC monitor control utility",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,
    /// Configuration file (defaults to IPCMON_CONFIG, then the standard candidates)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Longest virtual run accepted on the command line: one day.
pub const MAX_SIMULATED_SECONDS: u64 = 86_400;

/// Options shared by every simulation-backed command.
#[derive(Debug, Clone, Args)]
pub struct RunOptions {
    /// Virtual seconds to simulate before producing output (at most one day)
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(0..=MAX_SIMULATED_SECONDS)
    )]
    pub seconds: u64,
    /// Override the configured simulation seed
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the full dashboard snapshot as JSON
    Snapshot(RunOptions),
    /// Write a JSON or CSV report export
    Export(commands::ExportArgs),
    /// Print the activity feed, newest first
    Feed(RunOptions),
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_path(path),
        None => Ok(AppConfig::load_with_source(&DEFAULT_CONFIG_CANDIDATES)?.config),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", VersionInfo::current().extended());
        return Ok(());
    }
    let Some(command) = cli.command else {
        eprintln!("no command given; see --help");
        std::process::exit(2);
    };
    let mut config = load_config(cli.config.as_ref())?;
    // stdout carries command output
    config.logging.stdout = false;
    init_tracing("ctl", &config.logging)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Snapshot(opts) => commands::snapshot(&config, &opts, &mut out)?,
        Commands::Export(args) => commands::export(&config, &args, &mut out)?,
        Commands::Feed(opts) => commands::feed(&config, &opts, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_are_bounded_to_one_day() {
        let cli = Cli::try_parse_from(["ipcmonctl", "snapshot", "--seconds", "86400"]).unwrap();
        match cli.command {
            Some(Commands::Snapshot(opts)) => assert_eq!(opts.seconds, MAX_SIMULATED_SECONDS),
            other => panic!("unexpected command {other:?}"),
        }

        let err = Cli::try_parse_from(["ipcmonctl", "feed", "--seconds", "86401"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(Cli::try_parse_from([
            "ipcmonctl",
            "export",
            "--format",
            "csv",
            "--seconds",
            "18446744073709551615",
        ])
        .is_err());
    }
}
