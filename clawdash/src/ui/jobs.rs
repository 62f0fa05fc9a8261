use super::*;

use ratatui::widgets::{Cell, Row, Table};

use crate::message_format::{job_state_style, truncate};

pub(super) fn render_jobs(frame: &mut Frame, app: &mut App, area: Rect) {
    // Layout: summary cards, table
    let chunks = Layout::vertical([
        Constraint::Length(3), // Summary
        Constraint::Min(3),    // Table
    ])
    .split(area);

    render_summary(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.dashboard.jobs().summary();
    let cards = [
        ("Total", summary.total, Color::White),
        ("Pending", summary.pending, Color::Yellow),
        ("Running", summary.in_progress, Color::Cyan),
        ("Completed", summary.completed, Color::Green),
        ("Failed", summary.failed, Color::Red),
        ("Stuck", summary.stuck, Color::Magenta),
    ];
    let slots = Layout::horizontal([Constraint::Ratio(1, cards.len() as u32); 6]).split(area);

    for ((label, count, color), slot) in cards.into_iter().zip(slots.iter()) {
        let card = Paragraph::new(Line::from(vec![
            Span::styled(count.to_string(), Style::default().fg(color).bold()),
            Span::styled(format!(" {}", label), Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SEPARATOR_COLOR)),
        );
        frame.render_widget(card, *slot);
    }
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let header_cells = ["ID", "Title", "State", "Created"]
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1);

    let jobs = app.dashboard.jobs();
    let rows: Vec<Row> = jobs
        .jobs()
        .iter()
        .map(|job| {
            Row::new([
                Cell::from(job.short_id().to_string()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate(&job.title, 60)),
                Cell::from(job.state.clone()).style(job_state_style(&job.state)),
                Cell::from(job.created_display()),
            ])
        })
        .collect();

    let title = if jobs.is_loading() && !jobs.is_loaded() {
        " Jobs (loading...) ".to_string()
    } else {
        format!(" Jobs ({}) ", jobs.jobs().len())
    };

    let widths = [
        Constraint::Length(10), // ID
        Constraint::Fill(1),    // Title (flexible)
        Constraint::Length(12), // State
        Constraint::Length(20), // Created
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

    frame.render_stateful_widget(table, area, &mut app.jobs_state);
}
