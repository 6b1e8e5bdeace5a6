//! ---
//! ipcmon_section: "04-dashboard"
//! ipcmon_subsection: "binary"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Dashboard view state, text entry and key bindings."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ipcmon_report::{ExportFormat, ReportExporter};
use ipcmon_sim::{ActivityKind, DashboardSnapshot, TelemetryStore};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcTab {
    Pipes,
    Queues,
    SharedMemory,
}

impl IpcTab {
    pub const ALL: [IpcTab; 3] = [IpcTab::Pipes, IpcTab::Queues, IpcTab::SharedMemory];

    pub fn title(self) -> &'static str {
        match self {
            IpcTab::Pipes => "Pipes",
            IpcTab::Queues => "Queues",
            IpcTab::SharedMemory => "Shared Memory",
        }
    }

    pub fn index(self) -> usize {
        match self {
            IpcTab::Pipes => 0,
            IpcTab::Queues => 1,
            IpcTab::SharedMemory => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTab {
    Overview,
    Performance,
    Security,
}

impl ReportTab {
    pub const ALL: [ReportTab; 3] = [ReportTab::Overview, ReportTab::Performance, ReportTab::Security];

    pub fn title(self) -> &'static str {
        match self {
            ReportTab::Overview => "Overview",
            ReportTab::Performance => "Performance",
            ReportTab::Security => "Security",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ReportTab::Overview => 0,
            ReportTab::Performance => 1,
            ReportTab::Security => 2,
        }
    }
}

/// Field currently receiving typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Message(ActivityKind),
    Username,
    Password,
}

impl InputField {
    pub fn prompt(self) -> &'static str {
        match self {
            InputField::Message(ActivityKind::Pipe) => "Pipe message",
            InputField::Message(ActivityKind::Queue) => "Queue message",
            InputField::Message(ActivityKind::Shm) => "Shared memory message",
            InputField::Username => "Username",
            InputField::Password => "Password",
        }
    }
}

/// Single-line text editor opened by `p`, `m` or `l`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub field: InputField,
    pub buffer: String,
}

impl Editor {
    fn new(field: InputField) -> Self {
        Self {
            field,
            buffer: String::new(),
        }
    }

    /// Buffer as it should be drawn; passwords are masked.
    pub fn display(&self) -> String {
        match self.field {
            InputField::Password => "*".repeat(self.buffer.chars().count()),
            _ => self.buffer.clone(),
        }
    }
}

/// What a key press asks the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Send(ActivityKind, String),
    Login { username: String, password: String },
    SignOut,
    Export(ExportFormat),
}

pub struct App {
    pub snapshot: Arc<DashboardSnapshot>,
    pub ipc_tab: IpcTab,
    pub report_tab: ReportTab,
    pub status: Option<String>,
    pub editor: Option<Editor>,
    /// Username already entered while the password field is open.
    pub pending_username: Option<String>,
    export_dir: PathBuf,
}

impl App {
    pub fn new(snapshot: Arc<DashboardSnapshot>, export_dir: PathBuf) -> Self {
        Self {
            snapshot,
            ipc_tab: IpcTab::Pipes,
            report_tab: ReportTab::Overview,
            status: None,
            editor: None,
            pending_username: None,
            export_dir,
        }
    }

    pub fn refresh(&mut self, snapshot: Arc<DashboardSnapshot>) {
        self.snapshot = snapshot;
    }

    /// Tab switches and text entry are applied here; everything touching the store is returned.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        if self.editor.is_some() {
            return self.handle_editor_key(key);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Tab => {
                self.ipc_tab = self.ipc_tab.next();
                Action::None
            }
            KeyCode::Char('1') => self.select_report(ReportTab::Overview),
            KeyCode::Char('2') => self.select_report(ReportTab::Performance),
            KeyCode::Char('3') => self.select_report(ReportTab::Security),
            KeyCode::Char('p') => self.open(InputField::Message(ActivityKind::Pipe)),
            KeyCode::Char('m') => self.open(InputField::Message(ActivityKind::Queue)),
            KeyCode::Char('j') => Action::Export(ExportFormat::Json),
            KeyCode::Char('c') => Action::Export(ExportFormat::Csv),
            KeyCode::Char('l') if self.snapshot.session.authenticated => Action::SignOut,
            KeyCode::Char('l') => self.open(InputField::Username),
            _ => Action::None,
        }
    }

    fn select_report(&mut self, tab: ReportTab) -> Action {
        self.report_tab = tab;
        Action::None
    }

    fn open(&mut self, field: InputField) -> Action {
        self.editor = Some(Editor::new(field));
        Action::None
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> Action {
        let Some(editor) = self.editor.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.editor = None;
                self.pending_username = None;
                Action::None
            }
            KeyCode::Backspace => {
                editor.buffer.pop();
                Action::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                editor.buffer.push(c);
                Action::None
            }
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }

    fn submit(&mut self) -> Action {
        let Some(editor) = self.editor.take() else {
            return Action::None;
        };
        match editor.field {
            InputField::Message(kind) => Action::Send(kind, editor.buffer),
            InputField::Username => {
                self.pending_username = Some(editor.buffer);
                self.editor = Some(Editor::new(InputField::Password));
                Action::None
            }
            InputField::Password => Action::Login {
                username: self.pending_username.take().unwrap_or_default(),
                password: editor.buffer,
            },
        }
    }

    /// Run `action` against the store. Returns `true` when the loop should exit.
    pub fn dispatch(&mut self, action: Action, store: &TelemetryStore) -> bool {
        match action {
            Action::None => return false,
            Action::Quit => return true,
            Action::Send(kind, text) => {
                self.status = Some(if store.send_message(kind, &text) {
                    format!("Sent {} message", kind.label())
                } else {
                    "Nothing sent: message is empty".to_owned()
                });
            }
            Action::Login { username, password } => {
                store.login(&username, &password);
                self.status = Some(match username.trim() {
                    "" => "Signed in".to_owned(),
                    name => format!("Signed in as {name}"),
                });
            }
            Action::SignOut => {
                store.sign_out();
                self.status = Some("Signed out".to_owned());
            }
            Action::Export(format) => self.export(format),
        }
        self.refresh(store.current());
        false
    }

    fn export(&mut self, format: ExportFormat) {
        let exporter = ReportExporter::new(&self.snapshot);
        match exporter.export(format, &self.export_dir) {
            Ok(path) => {
                info!(path = %path.display(), "dashboard export written");
                self.status = Some(format!("Exported {}", path.display()));
            }
            Err(err) => {
                warn!(error = %err, "dashboard export failed");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipcmon_common::SimulationConfig;
    use ipcmon_sim::TelemetrySimulator;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: PathBuf) -> App {
        App::new(Arc::new(TelemetrySimulator::new(3).snapshot()), dir)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_key(key(KeyCode::Char(c))), Action::None);
        }
    }

    #[test]
    fn tab_cycles_ipc_panel() {
        let mut app = app(PathBuf::from("reports"));
        assert_eq!(app.ipc_tab, IpcTab::Pipes);
        assert_eq!(app.handle_key(key(KeyCode::Tab)), Action::None);
        assert_eq!(app.ipc_tab, IpcTab::Queues);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.ipc_tab, IpcTab::SharedMemory);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.ipc_tab, IpcTab::Pipes);
    }

    #[test]
    fn number_keys_select_report_tab() {
        let mut app = app(PathBuf::from("reports"));
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.report_tab, ReportTab::Security);
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.report_tab, ReportTab::Performance);
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.report_tab, ReportTab::Overview);
    }

    #[test]
    fn command_keys_map_to_actions() {
        let mut app = app(PathBuf::from("reports"));
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Char('j'))),
            Action::Export(ExportFormat::Json)
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Char('c'))),
            Action::Export(ExportFormat::Csv)
        );
        assert_eq!(app.handle_key(key(KeyCode::Char('l'))), Action::SignOut);
        assert_eq!(app.handle_key(key(KeyCode::Char('z'))), Action::None);
    }

    #[test]
    fn message_editor_collects_typed_text() {
        let mut app = app(PathBuf::from("reports"));
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(
            app.editor.as_ref().map(|e| e.field),
            Some(InputField::Message(ActivityKind::Queue))
        );
        // command keys are plain text while editing
        type_text(&mut app, "quick job");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Action::Send(ActivityKind::Queue, "quick jo".to_owned())
        );
        assert!(app.editor.is_none());

        app.handle_key(key(KeyCode::Char('p')));
        type_text(&mut app, "abc");
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Action::None);
        assert!(app.editor.is_none());
    }

    #[test]
    fn signed_out_login_asks_for_username_then_password() {
        let mut snapshot = TelemetrySimulator::new(3).snapshot();
        snapshot.session.authenticated = false;
        let mut app = App::new(Arc::new(snapshot), PathBuf::from("reports"));

        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.editor.as_ref().map(|e| e.field), Some(InputField::Username));
        type_text(&mut app, "ops");
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);
        assert_eq!(app.editor.as_ref().map(|e| e.field), Some(InputField::Password));
        assert_eq!(app.pending_username.as_deref(), Some("ops"));

        type_text(&mut app, "pw");
        assert_eq!(app.editor.as_ref().unwrap().display(), "**");
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Action::Login {
                username: "ops".to_owned(),
                password: "pw".to_owned()
            }
        );
        assert!(app.editor.is_none());
        assert!(app.pending_username.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_typed_message_is_not_counted() {
        let store = TelemetryStore::spawn(&SimulationConfig::default());
        let mut app = App::new(store.current(), PathBuf::from("reports"));
        let before = app.snapshot.stats.total_messages;

        app.handle_key(key(KeyCode::Char('p')));
        type_text(&mut app, "   ");
        let action = app.handle_key(key(KeyCode::Enter));
        assert!(!app.dispatch(action, &store));
        assert_eq!(app.snapshot.stats.total_messages, before);
        assert_eq!(app.status.as_deref(), Some("Nothing sent: message is empty"));

        app.handle_key(key(KeyCode::Char('p')));
        type_text(&mut app, "ping");
        let action = app.handle_key(key(KeyCode::Enter));
        assert!(!app.dispatch(action, &store));
        assert_eq!(app.snapshot.stats.total_messages, before + 1);
        assert_eq!(app.status.as_deref(), Some("Sent PIPE message"));

        store.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn typed_username_reaches_session() {
        let store = TelemetryStore::spawn(&SimulationConfig::default());
        let mut app = App::new(store.current(), PathBuf::from("reports"));

        let action = app.handle_key(key(KeyCode::Char('l')));
        assert!(!app.dispatch(action, &store));
        assert!(!app.snapshot.session.authenticated);

        app.handle_key(key(KeyCode::Char('l')));
        type_text(&mut app, "night-shift");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "secret");
        let action = app.handle_key(key(KeyCode::Enter));
        assert!(!app.dispatch(action, &store));

        assert!(app.snapshot.session.authenticated);
        assert_eq!(app.snapshot.session.username.as_deref(), Some("night-shift"));
        assert_eq!(app.status.as_deref(), Some("Signed in as night-shift"));
        store.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn export_action_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TelemetryStore::spawn(&SimulationConfig::default());
        let mut app = App::new(store.current(), dir.path().to_path_buf());

        assert!(!app.dispatch(Action::Export(ExportFormat::Csv), &store));
        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
        assert!(app.status.as_deref().unwrap().starts_with("Exported "));

        assert!(app.dispatch(Action::Quit, &store));
        store.shutdown().await;
    }
}
