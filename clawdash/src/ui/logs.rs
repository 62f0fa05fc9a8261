use super::*;

use crate::message_format::{level_column, level_style};

pub(super) fn render_logs(frame: &mut Frame, app: &mut App, area: Rect) {
    // Layout: filter bar, records
    let chunks = Layout::vertical([
        Constraint::Length(1), // Filter bar
        Constraint::Min(3),    // Records
    ])
    .split(area);

    render_filter_bar(frame, app, chunks[0]);
    render_records(frame, app, chunks[1]);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let logs = app.dashboard.logs();
    let mut spans = vec![
        Span::styled(" level ", Style::default().fg(LABEL_COLOR)),
        Span::styled(
            logs.filter().level().label().to_string(),
            Style::default().fg(Color::White).bold(),
        ),
        Span::raw("  "),
        Span::styled("target ", Style::default().fg(LABEL_COLOR)),
    ];

    let target_style = if app.log_target_editing {
        Style::default().fg(Color::Yellow).underlined()
    } else {
        Style::default().fg(Color::White)
    };
    let target = if app.log_target_input.is_empty() && !app.log_target_editing {
        "*".to_string()
    } else {
        app.log_target_input.clone()
    };
    spans.push(Span::styled(target, target_style));
    if app.log_target_editing {
        spans.push(Span::styled("█", Style::default().fg(Color::DarkGray)));
    }

    if logs.is_paused() {
        spans.push(Span::raw("  │ "));
        spans.push(Span::styled(
            format!("⏸ PAUSED ({} pending)", logs.pending_len()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    } else if app.log_follow {
        spans.push(Span::raw("  │ "));
        spans.push(Span::styled(
            "● FOLLOW",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_records(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    let visible = app.dashboard.logs().visible_count();

    let max_scroll = visible.saturating_sub(height);
    if app.log_follow {
        app.log_scroll = 0;
    } else if app.log_scroll > max_scroll {
        app.log_scroll = max_scroll;
    }

    let logs = app.dashboard.logs();
    // Newest at the bottom; the window ends `log_scroll` records above it.
    let mut window: Vec<_> = logs
        .visible()
        .rev()
        .skip(app.log_scroll)
        .take(height)
        .collect();
    window.reverse();

    let lines: Vec<Line> = window
        .into_iter()
        .map(|record| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", record.clock_time()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{} ", level_column(&record.level)),
                    level_style(&record.level),
                ),
                Span::styled(
                    format!("{} ", record.target),
                    Style::default().fg(LABEL_COLOR),
                ),
                Span::raw(record.message.clone()),
            ])
        })
        .collect();

    let mut title = format!(" Logs ({}/{}) ", visible, logs.len());
    if logs.evicted() > 0 {
        title = format!(" Logs ({}/{}, {} dropped) ", visible, logs.len(), logs.evicted());
    }
    let paragraph = Paragraph::new(lines).block(panel(title, SEPARATOR_COLOR));
    frame.render_widget(paragraph, area);
}
