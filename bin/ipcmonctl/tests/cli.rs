//! ---
//! ipcmon_section: "05-control-cli"
//! ipcmon_subsection: "tests"
//! ipcmon_type: "source"
//! ipcmon_scope: "test"
//! ipcmon_description: "End-to-end invocations of the control CLI binary."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use assert_cmd::Command;
use tempfile::tempdir;

fn ctl(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("ipcmonctl").unwrap();
    cmd.current_dir(dir).env_remove("IPCMON_CONFIG");
    cmd
}

#[test]
fn version_flag_prints_product() {
    let dir = tempdir().unwrap();
    let output = ctl(dir.path()).arg("-V").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("IPC Framework v"));
}

#[test]
fn export_csv_to_stdout_is_six_lines() {
    let dir = tempdir().unwrap();
    let output = ctl(dir.path())
        .args(["export", "--format", "csv", "--seconds", "10", "--output", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.starts_with("Metric,Value"));
}

#[test]
fn config_file_drives_export_directory() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("ipcmon.toml"),
        "[simulation]\nseed = 3\n\n[export]\ndirectory = \"exports\"\n",
    )
    .unwrap();
    let output = ctl(dir.path())
        .args(["export", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let entries: Vec<_> = std::fs::read_dir(dir.path().join("exports"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn invalid_config_fails() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("ipcmon.toml"),
        "[simulation]\nconnection_interval_ms = 0\n",
    )
    .unwrap();
    let output = ctl(dir.path()).args(["feed"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("connection_interval_ms"));
}

#[test]
fn out_of_range_seconds_are_rejected() {
    let dir = tempdir().unwrap();
    let output = ctl(dir.path())
        .args(["snapshot", "--seconds", "18446744073709551615"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--seconds"), "{stderr}");
}
