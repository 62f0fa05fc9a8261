//! UI rendering for the TUI.

mod chat;
mod extensions;
mod jobs;
mod logs;
mod memory;

use clawdash_core::ChannelKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Tab};
use crate::message_format::connection_badge;

// ========== Standard View Colors ==========

/// Separator line color
const SEPARATOR_COLOR: Color = Color::Rgb(60, 60, 60);
/// Border color for the transcript block
const BORDER_MESSAGES: Color = Color::Rgb(80, 160, 80);
/// Border color for memory blocks
const BORDER_MEMORY: Color = Color::Rgb(180, 100, 180);
/// Border color for jobs and extensions tables
const BORDER_INFO: Color = Color::Rgb(0, 150, 150);
/// Label color for metadata attributes
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Approval banner background
const APPROVAL_BG: Color = Color::Rgb(90, 60, 0);

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: tab header, tab body, footer
    let chunks = Layout::vertical([
        Constraint::Length(2), // Tab header
        Constraint::Min(5),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_tab_header(frame, app, chunks[0]);
    match app.tab {
        Tab::Chat => chat::render_chat(frame, app, chunks[1]),
        Tab::Memory => memory::render_memory(frame, app, chunks[1]),
        Tab::Jobs => jobs::render_jobs(frame, app, chunks[1]),
        Tab::Logs => logs::render_logs(frame, app, chunks[1]),
        Tab::Extensions => extensions::render_extensions(frame, app, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);
}

/// Render the tab bar with connection indicators on the right.
fn render_tab_header(frame: &mut Frame, app: &App, area: Rect) {
    // Layout: app name on left, tabs in center, connections on right
    let chunks = Layout::horizontal([
        Constraint::Length(11), // App name
        Constraint::Min(1),     // Tabs
        Constraint::Length(44), // Connections
    ])
    .split(area);

    let app_name = Paragraph::new(" clawdash").style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(app_name, chunks[0]);

    let active_style = Style::default()
        .fg(Color::Cyan)
        .bold()
        .add_modifier(Modifier::UNDERLINED);
    let inactive_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for (idx, tab) in Tab::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *tab == app.tab {
            active_style
        } else {
            inactive_style
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
    }
    let tabs = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[1]);

    let mut status = Vec::new();
    for kind in [ChannelKind::Chat, ChannelKind::Logs] {
        let state = app.dashboard.connection_state(kind);
        let (dot, style) = connection_badge(state);
        status.push(Span::styled(format!("{} ", dot), style));
        status.push(Span::styled(
            format!("{} ", kind.as_str()),
            Style::default().fg(LABEL_COLOR),
        ));
        status.push(Span::styled(
            format!("{}  ", state.label()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let connections =
        Paragraph::new(Line::from(status)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(connections, chunks[2]);
}

/// Key hints for the active tab.
fn footer_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.tab {
        Tab::Chat => {
            let mut hints = vec![("Enter", "send"), ("↑/↓", "scroll")];
            if app.dashboard.transcript().approval().is_some() {
                hints.extend([("^Y", "approve"), ("^A", "always"), ("^N", "deny")]);
            }
            hints
        }
        Tab::Memory if app.memory_search_editing => vec![("Enter/Esc", "done")],
        Tab::Memory => vec![
            ("j/k", "navigate"),
            ("Enter", "open"),
            ("/", "search"),
            ("u/d", "scroll file"),
            ("r", "reload"),
            ("Esc", "back"),
        ],
        Tab::Logs if app.log_target_editing => vec![("Enter/Esc", "done")],
        Tab::Logs => vec![
            ("p", "pause"),
            ("l", "level"),
            ("/", "target"),
            ("c", "clear"),
            ("f", "follow"),
            ("j/k", "scroll"),
        ],
        Tab::Jobs => vec![("j/k", "navigate"), ("x", "cancel"), ("r", "refresh")],
        Tab::Extensions => vec![
            ("j/k", "navigate"),
            ("a", "activate"),
            ("d", "remove"),
            ("r", "refresh"),
        ],
    }
}

/// Render the footer with key hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut footer_spans = vec![Span::raw(" ")];
    for (key, label) in footer_hints(app) {
        footer_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        footer_spans.push(Span::raw(format!(" {}  ", label)));
    }
    footer_spans.extend([
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" switch  "),
        Span::styled("^R", Style::default().fg(Color::Yellow)),
        Span::raw(" reconnect  "),
    ]);
    if app.is_editing() {
        footer_spans.push(Span::styled("^C", Style::default().fg(Color::Yellow)));
    } else {
        footer_spans.push(Span::styled("q", Style::default().fg(Color::Yellow)));
    }
    footer_spans.push(Span::raw(" quit"));

    let footer = Line::from(footer_spans);
    frame.render_widget(Paragraph::new(footer), area);
}

/// Rounded block with a colored title, as used by every panel.
fn panel(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).bold())
}

/// Hard-wrap `text` to `width` columns, one output line per wrapped row.
///
/// Counts chars, not display cells, which is close enough for log and
/// chat text.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            rows.push(chunk.iter().collect());
        }
    }
    rows
}

/// First line to show so that the window ends `from_bottom` lines above the end.
fn scroll_top(total: usize, height: usize, from_bottom: usize) -> usize {
    let max_top = total.saturating_sub(height);
    max_top.saturating_sub(from_bottom)
}
