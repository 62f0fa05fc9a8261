use super::*;

use clawdash_core::memory::MemoryView;
use ratatui::widgets::{List, ListItem, ListState, Wrap};

use crate::message_format::truncate;

pub(super) fn render_memory(frame: &mut Frame, app: &mut App, area: Rect) {
    // Layout: search bar, then list | viewer
    let rows = Layout::vertical([
        Constraint::Length(3), // Search
        Constraint::Min(3),    // Panels
    ])
    .split(area);
    let panels = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_search_bar(frame, app, rows[0]);
    render_list(frame, app, panels[0]);
    render_viewer(frame, app, panels[1]);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let memory = app.dashboard.memory();
    let mut spans = vec![Span::styled("/ ", Style::default().fg(Color::Cyan))];
    if memory.query().is_empty() && !app.memory_search_editing {
        spans.push(Span::styled(
            "search memory",
            Style::default().fg(Color::DarkGray).italic(),
        ));
    } else {
        spans.push(Span::raw(memory.query().to_string()));
    }
    if app.memory_search_editing {
        spans.push(Span::styled("█", Style::default().fg(Color::DarkGray)));
    }
    if memory.is_search_pending() {
        spans.push(Span::styled("  …", Style::default().fg(Color::DarkGray)));
    }

    let border = if app.memory_search_editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(bar, area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let memory = app.dashboard.memory();

    let (title, items): (String, Vec<ListItem>) = match memory.view() {
        MemoryView::Tree => {
            let rows = memory.tree().rows();
            let items = if rows.is_empty() {
                let text = if memory.tree().is_root_loading() {
                    "Loading..."
                } else {
                    "No files in workspace"
                };
                vec![ListItem::new(Span::styled(
                    text,
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                rows.iter()
                    .map(|row| {
                        let indent = "  ".repeat(row.depth);
                        let (icon, style) = match (row.is_dir, row.expanded) {
                            (true, true) => ("▾ ", Style::default().fg(Color::Cyan)),
                            (true, false) => ("▸ ", Style::default().fg(Color::Cyan)),
                            (false, _) => ("  ", Style::default()),
                        };
                        let mut spans = vec![
                            Span::raw(indent),
                            Span::styled(icon, style),
                            Span::styled(row.name.clone(), style),
                        ];
                        if row.loading {
                            spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect()
            };
            (" Workspace ".to_string(), items)
        }
        MemoryView::Searching { query } => (
            format!(" Searching \"{}\" ", query),
            vec![ListItem::new(Span::styled(
                "Searching...",
                Style::default().fg(Color::DarkGray),
            ))],
        ),
        MemoryView::Failed { query, error } => (
            format!(" Search \"{}\" ", query),
            vec![ListItem::new(Span::styled(
                format!("Search failed: {}", error),
                Style::default().fg(Color::Red),
            ))],
        ),
        MemoryView::Results { query, results } => {
            let items = if results.is_empty() {
                vec![ListItem::new(Span::styled(
                    "No results",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                results
                    .iter()
                    .map(|result| {
                        ListItem::new(vec![
                            Line::from(Span::styled(
                                result.path.clone(),
                                Style::default().fg(Color::Cyan).bold(),
                            )),
                            Line::from(Span::styled(
                                truncate(&result.snippet.replace('\n', " "), width),
                                Style::default().fg(Color::DarkGray),
                            )),
                        ])
                    })
                    .collect()
            };
            (
                format!(" {} results for \"{}\" ", results.len(), query),
                items,
            )
        }
    };

    let list = List::new(items)
        .block(panel(title, BORDER_MEMORY))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(Color::Cyan),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !app.memory_targets().is_empty() {
        state.select(Some(app.memory_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_viewer(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(file) = app.dashboard.memory().file().cloned() else {
        let hint = Paragraph::new(Span::styled(
            "Select a file to view it",
            Style::default().fg(Color::DarkGray).italic(),
        ))
        .block(panel(" Viewer ".to_string(), BORDER_MEMORY));
        frame.render_widget(hint, area);
        return;
    };

    let mut crumbs = Vec::new();
    for (idx, crumb) in file.breadcrumb().into_iter().enumerate() {
        if idx > 0 {
            crumbs.push(Span::styled(" / ", Style::default().fg(SEPARATOR_COLOR)));
        }
        crumbs.push(Span::styled(crumb.label, Style::default().fg(LABEL_COLOR)));
    }

    let mut lines = vec![Line::from(crumbs), Line::raw("")];
    lines.extend(file.body().lines().map(|line| Line::raw(line.to_string())));

    let max_scroll = lines.len().saturating_sub(1) as u16;
    if app.viewer_scroll > max_scroll {
        app.viewer_scroll = max_scroll;
    }

    let viewer = Paragraph::new(lines)
        .block(panel(format!(" {} ", file.path), BORDER_MEMORY))
        .wrap(Wrap { trim: false })
        .scroll((app.viewer_scroll, 0));
    frame.render_widget(viewer, area);
}
