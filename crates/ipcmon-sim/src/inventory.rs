//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Fixed display catalogues rendered beside the live counters."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PipeChannel {
    pub name: &'static str,
    pub writer: &'static str,
    pub reader: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct QueueInfo {
    pub name: &'static str,
    pub depth: u32,
    pub description: &'static str,
}

impl QueueInfo {
    pub fn depth_label(&self) -> String {
        match self.depth {
            1 => "1 message".to_owned(),
            n => format!("{n} messages"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SharedSegment {
    pub name: &'static str,
    pub size_bytes: u32,
    pub processes: u32,
    pub state: &'static str,
}

/// Label plus a whole percentage.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ResourceUsage {
    pub label: &'static str,
    pub percent: u16,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ErrorBucket {
    pub label: &'static str,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HealthCheck {
    pub component: &'static str,
    pub state: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SecurityTotals {
    pub successful_auth: u32,
    pub warnings: u32,
    pub critical: u32,
}

pub const PIPE_CHANNELS: [PipeChannel; 2] = [
    PipeChannel {
        name: "pipe_0",
        writer: "Process A",
        reader: "Process B",
    },
    PipeChannel {
        name: "pipe_1",
        writer: "Process C",
        reader: "Process D",
    },
];

pub const QUEUES: [QueueInfo; 2] = [
    QueueInfo {
        name: "queue_main",
        depth: 3,
        description: "Primary message queue",
    },
    QueueInfo {
        name: "queue_priority",
        depth: 1,
        description: "High priority messages",
    },
];

pub const SHARED_SEGMENTS: [SharedSegment; 1] = [SharedSegment {
    name: "shm_main",
    size_bytes: 8192,
    processes: 4,
    state: "Active",
}];

pub const RESOURCE_USAGE: [ResourceUsage; 3] = [
    ResourceUsage {
        label: "CPU Usage",
        percent: 23,
    },
    ResourceUsage {
        label: "Memory Usage",
        percent: 67,
    },
    ResourceUsage {
        label: "Network I/O",
        percent: 45,
    },
];

pub const ERROR_DISTRIBUTION: [ErrorBucket; 4] = [
    ErrorBucket {
        label: "Timeout Errors",
        count: 12,
    },
    ErrorBucket {
        label: "Permission Denied",
        count: 5,
    },
    ErrorBucket {
        label: "Connection Failed",
        count: 8,
    },
    ErrorBucket {
        label: "Invalid Format",
        count: 3,
    },
];

pub const HEALTH_CHECKS: [HealthCheck; 3] = [
    HealthCheck {
        component: "IPC Core",
        state: "Operational",
    },
    HealthCheck {
        component: "Security Layer",
        state: "Active",
    },
    HealthCheck {
        component: "Message Processing",
        state: "Running",
    },
];

pub const SECURITY_TOTALS: SecurityTotals = SecurityTotals {
    successful_auth: 1_847,
    warnings: 23,
    critical: 3,
};
