//! ---
//! ipcmon_section: "03-reporting"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Report export routines for the reports module."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use ipcmon_common::time::epoch_millis;
use ipcmon_sim::{DashboardSnapshot, PerformanceMetric, ReportSummary, SecurityLogEntry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ExportError, Result};

pub const CSV_HEADER: [&str; 2] = ["Metric", "Value"];

/// CSV row labels, in output order.
pub const CSV_METRICS: [&str; 5] = [
    "Total Operations",
    "Success Rate (%)",
    "Avg Latency (ms)",
    "Security Events",
    "Active Processes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExportError::UnknownFormat(other.to_owned())),
        }
    }
}

/// Top-level JSON export document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub generated_at: String,
    pub summary: ReportSummary,
    pub performance: Vec<PerformanceMetric>,
    pub security: Vec<SecurityLogEntry>,
}

impl ReportDocument {
    pub fn from_snapshot(snapshot: &DashboardSnapshot, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            summary: snapshot.report.clone(),
            performance: snapshot.performance.clone(),
            security: snapshot.security.clone(),
        }
    }
}

pub fn render_json(document: &ReportDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// `Metric,Value` header followed by one row per summary metric.
pub fn render_csv(summary: &ReportSummary) -> Result<String> {
    let values = [
        summary.total_operations.to_string(),
        summary.success_rate.to_string(),
        summary.avg_latency.to_string(),
        summary.security_events.to_string(),
        summary.active_processes.to_string(),
    ];
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for (metric, value) in CSV_METRICS.iter().zip(values.iter()) {
        writer.write_record([*metric, value.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn report_file_name(format: ExportFormat, generated_at: DateTime<Utc>) -> String {
    format!(
        "ipc-report-{}.{}",
        epoch_millis(&generated_at),
        format.extension()
    )
}

/// Renders one snapshot of the reports module and writes it to disk.
#[derive(Debug)]
pub struct ReportExporter<'a> {
    snapshot: &'a DashboardSnapshot,
    generated_at: DateTime<Utc>,
}

impl<'a> ReportExporter<'a> {
    pub fn new(snapshot: &'a DashboardSnapshot) -> Self {
        Self::at(snapshot, Utc::now())
    }

    pub fn at(snapshot: &'a DashboardSnapshot, generated_at: DateTime<Utc>) -> Self {
        Self {
            snapshot,
            generated_at,
        }
    }

    pub fn document(&self) -> ReportDocument {
        ReportDocument::from_snapshot(self.snapshot, self.generated_at)
    }

    pub fn file_name(&self, format: ExportFormat) -> String {
        report_file_name(format, self.generated_at)
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => render_json(&self.document()),
            ExportFormat::Csv => render_csv(&self.snapshot.report),
        }
    }

    /// Write the export into `output_dir`, creating it if needed, and return the file path.
    ///
    /// Existing files are never overwritten: when `ipc-report-<millis>.<ext>` is taken the
    /// export lands in `ipc-report-<millis>-1.<ext>`, `-2`, and so on.
    pub fn export(&self, format: ExportFormat, output_dir: &Path) -> Result<PathBuf> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }
        let contents = self.render(format)?;
        let millis = epoch_millis(&self.generated_at);
        let mut attempt: u32 = 0;
        loop {
            let name = match attempt {
                0 => self.file_name(format),
                n => format!("ipc-report-{millis}-{n}.{}", format.extension()),
            };
            let path = output_dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(contents.as_bytes())?;
                    info!(format = %format, path = %path.display(), "report exported");
                    return Ok(path);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists && attempt < u32::MAX => {
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ipcmon_sim::{ReportDelta, TelemetrySimulator, TickKind};
    use tempfile::tempdir;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    }

    fn ticked_snapshot() -> DashboardSnapshot {
        let mut sim = TelemetrySimulator::new(21);
        for _ in 0..25 {
            sim.tick(TickKind::Report);
        }
        sim.snapshot()
    }

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(" csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        let err = "xml".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::UnknownFormat(ref f) if f == "xml"));
    }

    #[test]
    fn file_name_uses_epoch_millis() {
        let name = report_file_name(ExportFormat::Json, fixed_instant());
        assert_eq!(name, "ipc-report-1717230600000.json");
        assert!(report_file_name(ExportFormat::Csv, fixed_instant()).ends_with(".csv"));
    }

    #[test]
    fn csv_has_header_and_five_rows_in_order() {
        let snapshot = ticked_snapshot();
        let csv = render_csv(&snapshot.report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Metric,Value");
        for (line, metric) in lines[1..].iter().zip(CSV_METRICS) {
            assert!(line.starts_with(&format!("{metric},")), "{line}");
        }
        assert_eq!(
            lines[1],
            format!("Total Operations,{}", snapshot.report.total_operations)
        );
        assert_eq!(lines[4], "Security Events,3");
        assert_eq!(lines[5], "Active Processes,12");
    }

    #[test]
    fn csv_values_parse_back() {
        let mut sim = TelemetrySimulator::new(0);
        sim.apply_report(ReportDelta {
            operations: 3,
            latency_ms: 0.05,
            success_rate: 0.01,
        });
        let report = sim.snapshot().report;
        let csv = render_csv(&report).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<(String, String)> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].1.parse::<u64>().unwrap(), 15_850);
        assert_eq!(rows[1].1.parse::<f64>().unwrap(), report.success_rate);
        assert_eq!(rows[2].1.parse::<f64>().unwrap(), report.avg_latency);
    }

    #[test]
    fn json_round_trips_summary() {
        let snapshot = ticked_snapshot();
        let exporter = ReportExporter::at(&snapshot, fixed_instant());
        let json = exporter.render(ExportFormat::Json).unwrap();

        let parsed: ReportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary, snapshot.report);
        assert_eq!(parsed, exporter.document());
        assert_eq!(parsed.generated_at, "2024-06-01T08:30:00.000Z");

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in ["generatedAt", "summary", "performance", "security"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(value["performance"].as_array().unwrap().len(), 3);
        assert_eq!(value["security"][2]["severity"], "critical");
        assert!(json.contains("\n  \"summary\""));
    }

    #[test]
    fn export_writes_named_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/reports");
        let snapshot = ticked_snapshot();
        let exporter = ReportExporter::at(&snapshot, fixed_instant());

        let path = exporter.export(ExportFormat::Csv, &out).unwrap();
        assert_eq!(path, out.join("ipc-report-1717230600000.csv"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, exporter.render(ExportFormat::Csv).unwrap());

        let path = exporter.export(ExportFormat::Json, &out).unwrap();
        let parsed: ReportDocument =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed.summary, snapshot.report);
    }

    #[test]
    fn same_millisecond_exports_do_not_overwrite() {
        let dir = tempdir().unwrap();
        let first = ticked_snapshot();
        let mut second = first.clone();
        second.report.total_operations += 1;

        let a = ReportExporter::at(&first, fixed_instant())
            .export(ExportFormat::Csv, dir.path())
            .unwrap();
        let b = ReportExporter::at(&second, fixed_instant())
            .export(ExportFormat::Csv, dir.path())
            .unwrap();
        let c = ReportExporter::at(&second, fixed_instant())
            .export(ExportFormat::Csv, dir.path())
            .unwrap();

        assert_eq!(a, dir.path().join("ipc-report-1717230600000.csv"));
        assert_eq!(b, dir.path().join("ipc-report-1717230600000-1.csv"));
        assert_eq!(c, dir.path().join("ipc-report-1717230600000-2.csv"));
        assert_eq!(fs::read_to_string(&a).unwrap(), render_csv(&first.report).unwrap());
        assert_eq!(fs::read_to_string(&b).unwrap(), render_csv(&second.report).unwrap());
    }
}
