//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Telemetry state machine driving every dashboard panel."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use chrono::{DateTime, Local, Utc};
use rand::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::activity::{ActivityEvent, ActivityFeed, ActivityKind};
use crate::report::{PerformanceMetric, ReportDelta, ReportSummary};
use crate::security::{SecurityLog, SecurityLogEntry};
use crate::session::{SessionPanel, SessionView};
use crate::snapshot::{ConnectionDelta, TelemetrySnapshot};

/// The three update routines, each with its own cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickKind {
    /// Connection walk and message counter, every 3s by default.
    Connection,
    /// Activity feed event, every 5s by default.
    Activity,
    /// Reports summary drift, every 2s by default.
    Report,
}

impl TickKind {
    pub const ALL: [TickKind; 3] = [TickKind::Connection, TickKind::Activity, TickKind::Report];
}

/// Number of ticks applied so far, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickCounters {
    pub connection: u64,
    pub activity: u64,
    pub report: u64,
}

impl TickCounters {
    fn record(&mut self, kind: TickKind) {
        let slot = match kind {
            TickKind::Connection => &mut self.connection,
            TickKind::Activity => &mut self.activity,
            TickKind::Report => &mut self.report,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        self.connection + self.activity + self.report
    }
}

/// Immutable view of the whole dashboard at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub stats: TelemetrySnapshot,
    pub activity: Vec<ActivityEvent>,
    pub report: ReportSummary,
    pub performance: Vec<PerformanceMetric>,
    pub security: Vec<SecurityLogEntry>,
    pub session: SessionView,
    pub ticks: TickCounters,
}

/// Owns every simulated value and the random source that perturbs them.
#[derive(Debug)]
pub struct TelemetrySimulator {
    rng: StdRng,
    stats: TelemetrySnapshot,
    activity: ActivityFeed,
    report: ReportSummary,
    performance: Vec<PerformanceMetric>,
    security: SecurityLog,
    session: SessionPanel,
    ticks: TickCounters,
}

impl TelemetrySimulator {
    pub fn new(seed: u64) -> Self {
        Self::starting_at(seed, Local::now())
    }

    /// Seed every panel as of `now`.
    pub fn starting_at(seed: u64, now: DateTime<Local>) -> Self {
        let security = SecurityLog::seeded(now);
        let mut report = ReportSummary::seeded(now.with_timezone(&Utc));
        report.security_events = u32::try_from(security.len()).unwrap_or(u32::MAX);
        Self {
            rng: StdRng::seed_from_u64(seed),
            stats: TelemetrySnapshot::default(),
            activity: ActivityFeed::seeded(now),
            report,
            performance: PerformanceMetric::table(),
            security,
            session: SessionPanel::default(),
            ticks: TickCounters::default(),
        }
    }

    /// Run one scheduled update routine with a freshly drawn delta.
    pub fn tick(&mut self, kind: TickKind) {
        match kind {
            TickKind::Connection => {
                let delta = ConnectionDelta::sample(&mut self.rng);
                self.apply_connection(delta);
            }
            TickKind::Activity => {
                self.emit_activity_event();
            }
            TickKind::Report => {
                let delta = ReportDelta::sample(&mut self.rng);
                self.apply_report(delta);
            }
        }
    }

    /// Connection tick with a caller-chosen delta.
    pub fn apply_connection(&mut self, delta: ConnectionDelta) {
        self.stats.apply(delta);
        self.ticks.record(TickKind::Connection);
        trace!(
            connections = self.stats.active_connections,
            messages = self.stats.total_messages,
            "connection tick"
        );
    }

    /// Report tick with a caller-chosen delta.
    pub fn apply_report(&mut self, delta: ReportDelta) {
        self.report.apply(delta);
        self.ticks.record(TickKind::Report);
        trace!(
            operations = self.report.total_operations,
            success_rate = self.report.success_rate,
            latency_ms = self.report.avg_latency,
            "report tick"
        );
    }

    pub fn emit_activity_event(&mut self) -> &ActivityEvent {
        self.emit_activity_event_at(Local::now())
    }

    pub fn emit_activity_event_at(&mut self, at: DateTime<Local>) -> &ActivityEvent {
        self.ticks.record(TickKind::Activity);
        let event = self.activity.emit(&mut self.rng, at);
        trace!(id = event.id, kind = ?event.kind, "activity event");
        event
    }

    /// Manual send from the methods panel. Blank text is ignored.
    pub fn send_message(&mut self, kind: ActivityKind, text: &str) -> bool {
        if text.trim().is_empty() {
            debug!(kind = ?kind, "ignoring blank message");
            return false;
        }
        self.stats.record_sent_message();
        debug!(kind = ?kind, bytes = text.len(), total = self.stats.total_messages, "message sent");
        true
    }

    pub fn login(&mut self, username: &str, password: &str) -> bool {
        self.session.submit(username, password)
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
    }

    pub fn stats(&self) -> &TelemetrySnapshot {
        &self.stats
    }

    pub fn activity(&self) -> &ActivityFeed {
        &self.activity
    }

    pub fn report(&self) -> &ReportSummary {
        &self.report
    }

    pub fn security(&self) -> &SecurityLog {
        &self.security
    }

    pub fn ticks(&self) -> TickCounters {
        self.ticks
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: self.stats.clone(),
            activity: self.activity.to_vec(),
            report: self.report.clone(),
            performance: self.performance.clone(),
            security: self.security.entries().to_vec(),
            session: self.session.view(),
            ticks: self.ticks,
        }
    }
}
