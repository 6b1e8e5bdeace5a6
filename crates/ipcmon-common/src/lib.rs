//! ---
//! ipcmon_section: "01-core-functionality"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Shared primitives and utilities for the monitor runtime."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
//! Core shared primitives for the IPC monitor workspace.
//! This crate exposes configuration loading, logging bootstrap, wall-clock
//! helpers and version metadata consumed by the simulator and binaries.

pub mod config;
pub mod logging;
pub mod time;
pub mod version;

pub use config::{AppConfig, ExportConfig, LoadedAppConfig, LoggingConfig, SimulationConfig};
pub use logging::{init_tracing, LogFormat};
pub use version::VersionInfo;
