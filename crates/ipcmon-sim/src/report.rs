//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Reports module summary and per-method performance table."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SUCCESS_RATE_CEILING: f64 = 100.0;
pub const LATENCY_FLOOR_MS: f64 = 1.0;

/// Headline numbers shown on the reports overview and exported as `summary`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// RFC 3339 instant the report state was created.
    pub timestamp: String,
    pub total_operations: u64,
    /// Percentage, never above 100.
    pub success_rate: f64,
    /// Milliseconds, never below 1.
    pub avg_latency: f64,
    pub security_events: u32,
    pub active_processes: u32,
}

impl ReportSummary {
    pub fn seeded(created_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_operations: 15_847,
            success_rate: 99.7,
            avg_latency: 2.4,
            security_events: 3,
            active_processes: 12,
        }
    }

    pub fn apply(&mut self, delta: ReportDelta) {
        self.total_operations = self.total_operations.saturating_add(delta.operations);
        self.avg_latency = (self.avg_latency + delta.latency_ms).max(LATENCY_FLOOR_MS);
        self.success_rate = (self.success_rate + delta.success_rate).min(SUCCESS_RATE_CEILING);
    }
}

/// Perturbation applied by a single report tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportDelta {
    pub operations: u64,
    pub latency_ms: f64,
    pub success_rate: f64,
}

impl ReportDelta {
    /// Operations grow by 0..=9; latency drifts symmetrically within ±0.1ms;
    /// success rate drifts within [-0.048, 0.052), biased slightly upward.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            operations: rng.gen_range(0..10),
            latency_ms: (rng.gen::<f64>() - 0.5) * 0.2,
            success_rate: (rng.gen::<f64>() - 0.48) * 0.1,
        }
    }
}

/// One row of the performance table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetric {
    pub method: String,
    pub operations: u64,
    pub avg_time: String,
    pub success_rate: f64,
    pub throughput: String,
}

impl PerformanceMetric {
    fn new(method: &str, operations: u64, avg_time: &str, success_rate: f64, throughput: &str) -> Self {
        Self {
            method: method.to_owned(),
            operations,
            avg_time: avg_time.to_owned(),
            success_rate,
            throughput: throughput.to_owned(),
        }
    }

    /// The fixed per-method table. It is not ticked.
    pub fn table() -> Vec<Self> {
        vec![
            Self::new("Pipes", 6_234, "1.2ms", 99.9, "5.2K/s"),
            Self::new("Message Queues", 7_891, "2.8ms", 99.8, "6.6K/s"),
            Self::new("Shared Memory", 1_722, "0.8ms", 99.5, "1.4K/s"),
        ]
    }
}
