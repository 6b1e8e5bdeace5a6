//! ---
//! ipcmon_section: "04-dashboard"
//! ipcmon_subsection: "binary"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Panel rendering for the terminal dashboard."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use ipcmon_common::version::VersionInfo;
use ipcmon_sim::inventory::{
    ERROR_DISTRIBUTION, HEALTH_CHECKS, PIPE_CHANNELS, QUEUES, RESOURCE_USAGE, SECURITY_TOTALS,
    SHARED_SEGMENTS,
};
use ipcmon_sim::session::{
    ACCESS_LEVEL_LABEL, ENCRYPTION_LABEL, SECURITY_FEATURES, TOKEN_EXPIRY_LABEL,
};
use ipcmon_sim::{ActivityKind, Severity};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Row, Table, Tabs};
use ratatui::Frame;

use crate::app::{App, Editor, InputField, IpcTab, ReportTab};

const ACCENT: Color = Color::Cyan;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(14),
            Constraint::Length(2),
        ])
        .split(frame.size());

    draw_header(frame, app, rows[0]);
    draw_stats(frame, app, rows[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
        ])
        .split(rows[2]);
    draw_ipc_methods(frame, app, middle[0]);
    draw_activity(frame, app, middle[1]);
    draw_security_panel(frame, app, middle[2]);

    draw_reports(frame, app, rows[3]);
    draw_footer(frame, app, rows[4]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(ACCENT)))
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let version = VersionInfo::current();
    let session = &app.snapshot.session;
    let session_label = if session.authenticated {
        format!(
            "signed in as {}",
            session.username.as_deref().unwrap_or("operator")
        )
    } else {
        "signed out".to_owned()
    };
    let line = Line::from(vec![
        Span::styled(
            version.product,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {}  ", version.short())),
        Span::styled(
            format!("● {}", app.snapshot.stats.status.label()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(format!("  {session_label}")),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.snapshot.stats;
    let cells = [
        ("Active Connections", stats.active_connections.to_string()),
        ("Total Messages", stats.total_messages.to_string()),
        ("Active Pipes", stats.pipe_count.to_string()),
        ("Message Queues", stats.queue_count.to_string()),
    ];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);
    for ((label, value), column) in cells.iter().zip(columns.iter()) {
        let text = Paragraph::new(Line::from(Span::styled(
            value.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(panel(label));
        frame.render_widget(text, *column);
    }
}

fn draw_ipc_methods(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("IPC Methods");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    let tabs = Tabs::new(IpcTab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .select(app.ipc_tab.index())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, parts[0]);

    let lines: Vec<Line> = match app.ipc_tab {
        IpcTab::Pipes => PIPE_CHANNELS
            .iter()
            .map(|p| Line::from(format!("{}  {} → {}", p.name, p.writer, p.reader)))
            .chain(std::iter::once(Line::from("p: write a pipe message")))
            .collect(),
        IpcTab::Queues => QUEUES
            .iter()
            .map(|q| Line::from(format!("{}  {}  ({})", q.name, q.depth_label(), q.description)))
            .chain(std::iter::once(Line::from("m: write a queue message")))
            .collect(),
        IpcTab::SharedMemory => SHARED_SEGMENTS
            .iter()
            .map(|s| {
                Line::from(format!(
                    "{}  {} bytes  {} processes  {}",
                    s.name, s.size_bytes, s.processes, s.state
                ))
            })
            .collect(),
    };
    frame.render_widget(Paragraph::new(lines), parts[1]);
}

fn kind_color(kind: ActivityKind) -> Color {
    match kind {
        ActivityKind::Pipe => Color::Blue,
        ActivityKind::Queue => Color::Magenta,
        ActivityKind::Shm => Color::Green,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

fn draw_activity(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .snapshot
        .activity
        .iter()
        .map(|event| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<6}", event.kind.label()),
                    Style::default().fg(kind_color(event.kind)),
                ),
                Span::raw(format!("{}  ", event.timestamp)),
                Span::raw(event.message.as_str()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(panel("Real-time Activity")), area);
}

fn draw_security_panel(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = if app.snapshot.session.authenticated {
        vec![
            Line::from(format!("Encryption: {ENCRYPTION_LABEL}")),
            Line::from(format!("Token expires: {TOKEN_EXPIRY_LABEL}")),
            Line::from(format!("Access level: {ACCESS_LEVEL_LABEL}")),
            Line::from(""),
        ]
    } else {
        let mut lines = vec![Line::from(Span::styled(
            "Authentication required",
            Style::default().fg(Color::Yellow),
        ))];
        lines.extend(login_form(app));
        lines.push(Line::from(""));
        lines
    };
    lines.extend(SECURITY_FEATURES.iter().map(|f| Line::from(format!("✓ {f}"))));
    frame.render_widget(Paragraph::new(lines).block(panel("Security")), area);
}

fn login_form(app: &App) -> Vec<Line<'static>> {
    let editing = app.editor.as_ref().map(|e| e.field);
    let field = |label: &str, target: InputField, filled: String| {
        let active = editing == Some(target);
        let style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if active { "_" } else { "" };
        Line::from(Span::styled(format!("{label}: {filled}{cursor}"), style))
    };
    let (username, password) = match app.editor.as_ref() {
        Some(editor) if editor.field == InputField::Username => (editor.buffer.clone(), String::new()),
        Some(editor) if editor.field == InputField::Password => (
            app.pending_username.clone().unwrap_or_default(),
            editor.display(),
        ),
        _ => (String::new(), String::new()),
    };
    let hint = match editing {
        Some(InputField::Username) | Some(InputField::Password) => "Enter: next  Esc: cancel",
        _ => "l: sign in",
    };
    vec![
        field("Username", InputField::Username, username),
        field("Password", InputField::Password, password),
        Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
    ]
}

fn draw_reports(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("Reports");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    let tabs = Tabs::new(
        ReportTab::ALL
            .iter()
            .map(|t| t.title())
            .collect::<Vec<_>>(),
    )
    .select(app.report_tab.index())
    .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, parts[0]);

    match app.report_tab {
        ReportTab::Overview => draw_overview(frame, app, parts[1]),
        ReportTab::Performance => draw_performance(frame, app, parts[1]),
        ReportTab::Security => draw_security_report(frame, app, parts[1]),
    }
}

fn draw_overview(frame: &mut Frame, app: &App, area: Rect) {
    let report = &app.snapshot.report;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    let summary = vec![
        Line::from(format!("Total Operations: {}", report.total_operations)),
        Line::from(format!("Success Rate: {:.1}%", report.success_rate)),
        Line::from(format!("Avg Latency: {:.1}ms", report.avg_latency)),
        Line::from(format!("Security Events: {}", report.security_events)),
        Line::from(format!("Active Processes: {}", report.active_processes)),
    ];
    frame.render_widget(Paragraph::new(summary), columns[0]);

    let gauges = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); RESOURCE_USAGE.len()])
        .split(columns[1]);
    for (usage, row) in RESOURCE_USAGE.iter().zip(gauges.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(ACCENT))
            .percent(usage.percent)
            .label(format!("{} {}%", usage.label, usage.percent));
        frame.render_widget(gauge, *row);
    }

    let mut lines: Vec<Line> = ERROR_DISTRIBUTION
        .iter()
        .map(|e| Line::from(format!("{}: {}", e.label, e.count)))
        .collect();
    lines.push(Line::from(""));
    lines.extend(
        HEALTH_CHECKS
            .iter()
            .map(|h| Line::from(format!("{}: {}", h.component, h.state))),
    );
    frame.render_widget(Paragraph::new(lines), columns[2]);
}

fn draw_performance(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .snapshot
        .performance
        .iter()
        .map(|m| {
            Row::new(vec![
                m.method.clone(),
                m.operations.to_string(),
                m.avg_time.clone(),
                format!("{:.1}%", m.success_rate),
                m.throughput.clone(),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Method", "Operations", "Avg Time", "Success Rate", "Throughput"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(table, area);
}

fn draw_security_report(frame: &mut Frame, app: &App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let totals = Line::from(vec![
        Span::styled(
            format!("Successful Auth: {}  ", SECURITY_TOTALS.successful_auth),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Warnings: {}  ", SECURITY_TOTALS.warnings),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("Critical: {}", SECURITY_TOTALS.critical),
            Style::default().fg(Color::Red),
        ),
    ]);
    frame.render_widget(Paragraph::new(totals), parts[0]);

    let rows: Vec<Row> = app
        .snapshot
        .security
        .iter()
        .map(|entry| {
            Row::new(vec![
                entry.timestamp.clone(),
                entry.event.clone(),
                entry.severity.label().to_owned(),
                entry.details.clone(),
            ])
            .style(Style::default().fg(severity_color(entry.severity)))
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["Timestamp", "Event", "Severity", "Details"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(table, parts[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help = match app.editor {
        Some(_) => "Type to edit  Backspace delete  Enter submit  Esc cancel",
        None => "Tab IPC tab  1/2/3 report tab  p/m write message  j/c export JSON/CSV  l sign in/out  q quit",
    };
    let mut lines = vec![Line::from(Span::styled(help, Style::default().fg(Color::Gray)))];
    match (&app.editor, &app.status) {
        (Some(editor @ Editor { field: InputField::Message(_), .. }), _) => {
            lines.push(Line::from(vec![
                Span::styled(format!("{}> ", editor.field.prompt()), Style::default().fg(ACCENT)),
                Span::raw(format!("{}_", editor.buffer)),
            ]));
        }
        (_, Some(status)) => lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        ))),
        _ => {}
    }
    frame.render_widget(Paragraph::new(lines), area);
}
