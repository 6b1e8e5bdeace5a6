//! ---
//! ipcmon_section: "05-control-cli"
//! ipcmon_subsection: "binary"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Snapshot, export and feed subcommands."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ipcmon_common::config::AppConfig;
use ipcmon_report::{ExportFormat, ReportExporter};

use crate::headless::simulate;
use crate::RunOptions;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[arg(long, value_enum)]
    pub format: FormatArg,
    /// Output directory, or `-` for stdout (defaults to export.directory)
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub run: RunOptions,
}

pub fn snapshot(config: &AppConfig, opts: &RunOptions, out: &mut dyn Write) -> Result<()> {
    let simulator = simulate(&config.simulation, opts);
    serde_json::to_writer_pretty(&mut *out, &simulator.snapshot())?;
    out.write_all(b"\n")?;
    Ok(())
}

pub fn export(config: &AppConfig, args: &ExportArgs, out: &mut dyn Write) -> Result<()> {
    let simulator = simulate(&config.simulation, &args.run);
    let snapshot = simulator.snapshot();
    let exporter = ReportExporter::new(&snapshot);
    let format = ExportFormat::from(args.format);
    let target = args
        .output
        .clone()
        .unwrap_or_else(|| config.export.directory.clone());

    if target.as_os_str() == "-" {
        out.write_all(exporter.render(format)?.as_bytes())?;
        if format == ExportFormat::Json {
            out.write_all(b"\n")?;
        }
    } else {
        let path = exporter
            .export(format, &target)
            .with_context(|| format!("failed to export report into {}", target.display()))?;
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

pub fn feed(config: &AppConfig, opts: &RunOptions, out: &mut dyn Write) -> Result<()> {
    let simulator = simulate(&config.simulation, opts);
    for event in simulator.activity().iter() {
        writeln!(
            out,
            "{:<5} {}  {}",
            event.kind.label(),
            event.timestamp,
            event.message
        )?;
    }
    Ok(())
}
