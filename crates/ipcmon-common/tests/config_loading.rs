//! ---
//! ipcmon_section: "01-core-functionality"
//! ipcmon_subsection: "integration-tests"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Configuration discovery tests for shared runtime primitives."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::env;
use std::fs;
use std::time::Duration;

use ipcmon_common::config::AppConfig;
use tempfile::tempdir;

// Single test so the process-wide `IPCMON_CONFIG` variable is never raced.
#[test]
fn config_discovery_order() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let candidate = dir.path().join("ipcmon.toml");
    let override_path = dir.path().join("override.toml");

    env::remove_var(AppConfig::ENV_CONFIG_PATH);

    // Nothing on disk: defaults and no source.
    let loaded = AppConfig::load_with_source(&[&missing]).unwrap();
    assert!(loaded.source.is_none());
    assert_eq!(loaded.config.simulation.connection_interval, Duration::from_secs(3));

    // First existing candidate wins.
    fs::write(&candidate, "[simulation]\nseed = 11\n").unwrap();
    let loaded = AppConfig::load_with_source(&[&missing, &candidate]).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(candidate.as_path()));
    assert_eq!(loaded.config.simulation.seed, 11);

    // Environment override beats candidates.
    fs::write(&override_path, "[simulation]\nseed = 99\n").unwrap();
    env::set_var(AppConfig::ENV_CONFIG_PATH, &override_path);
    let loaded = AppConfig::load_with_source(&[&candidate]).unwrap();
    assert_eq!(loaded.config.simulation.seed, 99);

    // A broken override is reported rather than silently skipped.
    fs::write(&override_path, "[simulation]\nactivity_interval_ms = 0\n").unwrap();
    let err = AppConfig::load_with_source(&[&candidate]).unwrap_err();
    assert!(format!("{err:#}").contains("activity_interval_ms"));

    env::remove_var(AppConfig::ENV_CONFIG_PATH);
}
