//! ---
//! ipcmon_section: "01-core-functionality"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Shared primitives and utilities for the monitor runtime."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use chrono::{DateTime, TimeZone, Utc};

/// Time-of-day label shown next to activity feed entries.
pub fn clock_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}

/// Date and time label used by security log entries.
pub fn datetime_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Milliseconds since the Unix epoch, clamped at zero for pre-epoch instants.
pub fn epoch_millis(at: &DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp_millis()).unwrap_or(0)
}
