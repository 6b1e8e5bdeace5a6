//! ---
//! ipcmon_section: "03-reporting"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Report export routines for the reports module."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
//! Export of the reports module state.
//!
//! JSON carries the summary, the performance table and the security log; CSV
//! carries only the five summary metrics. Files are named
//! `ipc-report-<epoch millis>.<ext>`.

pub mod errors;
pub mod export;

pub use errors::{ExportError, Result};
pub use export::{
    render_csv, render_json, report_file_name, ExportFormat, ReportDocument, ReportExporter,
    CSV_HEADER, CSV_METRICS,
};
