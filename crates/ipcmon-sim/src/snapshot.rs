//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Connection and message counters shown in the stats grid."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive bounds of the connection random walk.
pub const MIN_ACTIVE_CONNECTIONS: u32 = 1;
pub const MAX_ACTIVE_CONNECTIONS: u32 = 10;

/// Largest message increment a single connection tick may apply.
pub const MAX_MESSAGES_PER_TICK: u64 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SystemStatus {
    #[default]
    Running,
}

impl SystemStatus {
    pub fn label(self) -> &'static str {
        match self {
            SystemStatus::Running => "Running",
        }
    }
}

/// Header statistics for the simulated IPC system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub active_connections: u32,
    pub total_messages: u64,
    pub pipe_count: u32,
    pub queue_count: u32,
    pub shm_segments: u32,
    pub status: SystemStatus,
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            active_connections: 3,
            total_messages: 847,
            pipe_count: 2,
            queue_count: 5,
            shm_segments: 1,
            status: SystemStatus::Running,
        }
    }
}

/// Direction of the connection random walk for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStep {
    Up,
    Down,
}

impl ConnectionStep {
    fn offset(self) -> i64 {
        match self {
            ConnectionStep::Up => 1,
            ConnectionStep::Down => -1,
        }
    }
}

/// Perturbation applied by a single connection tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionDelta {
    pub messages: u64,
    pub step: ConnectionStep,
}

impl ConnectionDelta {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let step = if rng.gen_bool(0.5) {
            ConnectionStep::Up
        } else {
            ConnectionStep::Down
        };
        Self {
            messages: rng.gen_range(0..=MAX_MESSAGES_PER_TICK),
            step,
        }
    }
}

impl TelemetrySnapshot {
    /// Apply one tick worth of change. Messages only grow; connections stay clamped.
    pub fn apply(&mut self, delta: ConnectionDelta) {
        self.total_messages = self.total_messages.saturating_add(delta.messages);
        let walked = i64::from(self.active_connections) + delta.step.offset();
        self.active_connections = walked.clamp(
            i64::from(MIN_ACTIVE_CONNECTIONS),
            i64::from(MAX_ACTIVE_CONNECTIONS),
        ) as u32;
    }

    /// Record a manually sent message.
    pub fn record_sent_message(&mut self) {
        self.total_messages = self.total_messages.saturating_add(1);
    }
}
