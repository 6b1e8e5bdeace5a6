//! ---
//! ipcmon_section: "03-reporting"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Report export routines for the reports module."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown export format '{0}' (expected json or csv)")]
    UnknownFormat(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("export produced invalid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
