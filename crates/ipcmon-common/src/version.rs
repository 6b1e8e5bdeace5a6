//! ---
//! ipcmon_section: "01-core-functionality"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Shared primitives and utilities for the monitor runtime."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use serde::Serialize;

/// Product name shown in dashboard headers and version output.
pub const PRODUCT_NAME: &str = "IPC Framework";

/// Build metadata reported by `--version`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub product: &'static str,
    pub version: &'static str,
    pub rust_version: Option<&'static str>,
    pub profile: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            product: PRODUCT_NAME,
            version: env!("CARGO_PKG_VERSION"),
            rust_version: option_env!("CARGO_PKG_RUST_VERSION").filter(|v| !v.is_empty()),
            profile: if cfg!(debug_assertions) { "debug" } else { "release" },
        }
    }

    /// Compact `v1.2.3` label for headers.
    pub fn short(&self) -> String {
        format!("v{}", self.version)
    }

    pub fn extended(&self) -> String {
        let mut out = format!("{} {} ({} build)", self.product, self.short(), self.profile);
        if let Some(msrv) = self.rust_version {
            out.push_str(&format!("\nminimum rust: {}", msrv));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_includes_product_and_version() {
        let info = VersionInfo::current();
        let text = info.extended();
        assert!(text.starts_with("IPC Framework v"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }
}
