use super::*;

use ratatui::widgets::{Cell, Row, Table};

use crate::message_format::truncate;

pub(super) fn render_extensions(frame: &mut Frame, app: &mut App, area: Rect) {
    // Layout: installed extensions, registered tools
    let chunks = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_extension_table(frame, app, chunks[0]);
    render_tool_table(frame, app, chunks[1]);
}

fn yes_no(flag: bool) -> Cell<'static> {
    if flag {
        Cell::from("yes").style(Style::default().fg(Color::Green))
    } else {
        Cell::from("no").style(Style::default().fg(Color::DarkGray))
    }
}

fn render_extension_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let header_cells = ["Name", "Kind", "Active", "Auth", "Tools", "Description"]
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1);

    let extensions = app.dashboard.extensions().extensions();
    let rows: Vec<Row> = extensions
        .iter()
        .map(|ext| {
            Row::new([
                Cell::from(ext.name.clone()).style(Style::default().bold()),
                Cell::from(ext.kind.clone()).style(Style::default().fg(LABEL_COLOR)),
                yes_no(ext.active),
                yes_no(ext.authenticated),
                Cell::from(ext.tools.len().to_string()),
                Cell::from(truncate(ext.description.as_deref().unwrap_or(""), 80))
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let title = format!(" Extensions ({}) ", extensions.len());

    let widths = [
        Constraint::Length(20), // Name
        Constraint::Length(10), // Kind
        Constraint::Length(7),  // Active
        Constraint::Length(5),  // Auth
        Constraint::Length(6),  // Tools
        Constraint::Fill(1),    // Description
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(title, BORDER_INFO))
        .row_highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(Color::Cyan),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut app.extensions_state);
}

fn render_tool_table(frame: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["Tool", "Description"]
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1);

    let tools = app.dashboard.extensions().tools();
    let rows: Vec<Row> = tools
        .iter()
        .map(|tool| {
            Row::new([
                Cell::from(tool.name.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(tool.description.clone()).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widths = [Constraint::Length(28), Constraint::Fill(1)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!(" Tools ({}) ", tools.len()), SEPARATOR_COLOR));
    frame.render_widget(table, area);
}
