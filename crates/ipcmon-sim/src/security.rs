//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Seeded security event log for the reports module."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use chrono::{DateTime, Duration, Local};
use ipcmon_common::time::datetime_label;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Critical => "CRIT",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityLogEntry {
    pub id: u32,
    pub timestamp: String,
    pub event: String,
    pub severity: Severity,
    pub details: String,
}

/// Security events shown in the reports module. Seeded once; there is no live ingestion.
#[derive(Debug, Clone, Default)]
pub struct SecurityLog {
    entries: Vec<SecurityLogEntry>,
}

impl SecurityLog {
    pub fn seeded(now: DateTime<Local>) -> Self {
        let seeds = [
            (
                Duration::zero(),
                "Authentication Success",
                Severity::Info,
                "Process PID 4521 authenticated successfully",
            ),
            (
                Duration::minutes(2),
                "Rate Limit Warning",
                Severity::Warning,
                "Process PID 3289 exceeded rate limit threshold",
            ),
            (
                Duration::minutes(5),
                "Invalid Token Attempt",
                Severity::Critical,
                "Unauthorized access attempt detected from PID 8912",
            ),
        ];
        let entries = seeds
            .into_iter()
            .zip(1u32..)
            .map(|((age, event, severity, details), id)| SecurityLogEntry {
                id,
                timestamp: datetime_label(&(now - age)),
                event: event.to_owned(),
                severity,
                details: details.to_owned(),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SecurityLogEntry] {
        &self.entries
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }
}
