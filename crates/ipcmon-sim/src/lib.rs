//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "01-bootstrap"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Simulation module exports and shared types."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
//! Simulated telemetry for the IPC monitor dashboard.
//!
//! Nothing here talks to real pipes, queues or shared memory. A seeded random
//! source perturbs a handful of counters on fixed cadences, and every panel of
//! the dashboard reads the resulting [`DashboardSnapshot`]. The
//! [`TelemetryStore`] owns the single [`TelemetrySimulator`] instance and drives
//! it from one ticking task; [`TickSchedule`] replays the same cadences on a
//! virtual clock for headless runs.

pub mod activity;
pub mod inventory;
pub mod report;
pub mod schedule;
pub mod security;
pub mod session;
pub mod simulator;
pub mod snapshot;
pub mod store;

pub use activity::{ActivityEvent, ActivityFeed, ActivityKind, ACTIVITY_FEED_CAPACITY};
pub use report::{PerformanceMetric, ReportDelta, ReportSummary};
pub use schedule::TickSchedule;
pub use security::{SecurityLog, SecurityLogEntry, Severity};
pub use session::{SessionPanel, SessionView};
pub use simulator::{DashboardSnapshot, TelemetrySimulator, TickCounters, TickKind};
pub use snapshot::{ConnectionDelta, ConnectionStep, SystemStatus, TelemetrySnapshot};
pub use store::TelemetryStore;
