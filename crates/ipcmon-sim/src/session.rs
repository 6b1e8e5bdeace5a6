//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Display-only authentication panel state."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
//! The security panel never checks credentials. Submitting the form logs the
//! attempt and marks the session authenticated; the expiry and cipher labels are
//! fixed strings, not derived from any token.

use serde::{Deserialize, Serialize};
use tracing::info;

pub const ENCRYPTION_LABEL: &str = "AES-256";
pub const TOKEN_EXPIRY_LABEL: &str = "23h 45m";
pub const ACCESS_LEVEL_LABEL: &str = "Admin";

pub const SECURITY_FEATURES: [&str; 4] = [
    "SHA-256 password hashing",
    "Token-based authentication",
    "Encrypted IPC channels",
    "24-hour session expiry",
];

#[derive(Debug, Clone)]
pub struct SessionPanel {
    authenticated: bool,
    username: Option<String>,
}

impl Default for SessionPanel {
    fn default() -> Self {
        Self {
            authenticated: true,
            username: None,
        }
    }
}

impl SessionPanel {
    /// Always succeeds. The password is never inspected or logged.
    pub fn submit(&mut self, username: &str, _password: &str) -> bool {
        info!(username = %username, "login attempt");
        let username = username.trim();
        self.username = (!username.is_empty()).then(|| username.to_owned());
        self.authenticated = true;
        true
    }

    /// Return to the login form.
    pub fn sign_out(&mut self) {
        info!(username = ?self.username, "signed out");
        self.authenticated = false;
        self.username = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            authenticated: self.authenticated,
            username: self.username.clone(),
        }
    }
}

/// Read-only projection published with each dashboard snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionView {
    pub authenticated: bool,
    pub username: Option<String>,
}
