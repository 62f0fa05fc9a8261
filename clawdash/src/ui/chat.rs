use super::*;

use clawdash_core::ChatMessage;
use ratatui::widgets::Wrap;

use crate::message_format::role_label;

/// Spinner frames for the status line.
const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub(super) fn render_chat(frame: &mut Frame, app: &mut App, area: Rect) {
    let approval_height = if app.dashboard.transcript().approval().is_some() {
        4
    } else {
        0
    };

    // Layout: transcript, approval banner, status line, input
    let chunks = Layout::vertical([
        Constraint::Min(3),                  // Transcript
        Constraint::Length(approval_height), // Approval banner
        Constraint::Length(1),               // Status line
        Constraint::Length(3),               // Input
    ])
    .split(area);

    render_transcript(frame, app, chunks[0]);
    if approval_height > 0 {
        render_approval(frame, app, chunks[1]);
    }
    render_status(frame, app, chunks[2]);
    render_input(frame, app, chunks[3]);
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (idx, msg) in app.dashboard.transcript().messages().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::raw(""));
        }
        lines.extend(format_message(msg, inner_width));
    }

    // Clamp scroll offset
    let max_scroll = lines.len().saturating_sub(inner_height);
    if app.chat_scroll > max_scroll {
        app.chat_scroll = max_scroll;
    }
    let top = scroll_top(lines.len(), inner_height, app.chat_scroll);

    let title = if app.chat_scroll > 0 {
        format!(" Chat (↑{}) ", app.chat_scroll)
    } else {
        " Chat ".to_string()
    };
    let paragraph = Paragraph::new(lines)
        .block(panel(title, BORDER_MESSAGES))
        .scroll((top as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Role header followed by the wrapped content.
fn format_message(msg: &ChatMessage, width: usize) -> Vec<Line<'static>> {
    let (label, style) = role_label(msg.role);
    let mut lines = vec![Line::from(Span::styled(label, style))];

    let mut content = msg.content.clone();
    if msg.is_stream_target {
        content.push('▌');
    }
    let body_style = match msg.role {
        clawdash_core::Role::System => Style::default().fg(Color::DarkGray).italic(),
        _ => Style::default(),
    };
    for row in wrap_text(&content, width.saturating_sub(2)) {
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(SEPARATOR_COLOR)),
            Span::styled(row, body_style),
        ]));
    }
    lines
}

fn render_approval(frame: &mut Frame, app: &App, area: Rect) {
    let Some(request) = app.dashboard.transcript().approval() else {
        return;
    };
    let mut lines = vec![Line::from(Span::styled(
        request.summary(),
        Style::default().fg(Color::Yellow).bold(),
    ))];
    if let Some(params) = &request.parameters {
        lines.push(Line::from(Span::styled(
            params.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    let banner = Paragraph::new(lines)
        .style(Style::default().bg(APPROVAL_BG))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(banner, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = app.dashboard.transcript().status() else {
        return;
    };
    let mut spans = vec![Span::raw(" ")];
    if status.in_progress {
        // Wall clock drives the spinner; the loop redraws at least every 100ms.
        let frame_idx = chrono::Local::now().timestamp_subsec_millis() as usize / 250;
        spans.push(Span::styled(
            format!("{} ", SPINNER[frame_idx % SPINNER.len()]),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(
        status.text.clone(),
        Style::default().fg(Color::DarkGray).italic(),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(app.chat_input.clone()),
        Span::styled("█", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(input, area);
}
