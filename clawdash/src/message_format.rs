//! Shared formatting helpers for TUI rendering.

use clawdash_core::{ConnectionState, LogLevel, Role};
use ratatui::style::{Color, Modifier, Style};

/// Role label and style for transcript rows.
pub fn role_label(role: Role) -> (&'static str, Style) {
    match role {
        Role::User => ("you", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Role::Assistant => (
            "assistant",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Role::System => ("system", Style::default().fg(Color::DarkGray)),
    }
}

/// Style for a log level column.
pub fn level_style(level: &LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Debug => Style::default().fg(Color::Blue),
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Other(_) => Style::default().fg(Color::Magenta),
    }
}

/// Level text padded to a fixed column, uppercased.
pub fn level_column(level: &LogLevel) -> String {
    format!("{:<5}", level.as_str().to_ascii_uppercase())
}

/// Dot and style for a connection indicator.
pub fn connection_badge(state: ConnectionState) -> (&'static str, Style) {
    match state {
        ConnectionState::Open => ("●", Style::default().fg(Color::Green)),
        ConnectionState::Connecting | ConnectionState::Reconnecting => {
            ("◌", Style::default().fg(Color::Yellow))
        }
        ConnectionState::Closed => ("○", Style::default().fg(Color::Red)),
    }
}

/// Style for a job state cell.
pub fn job_state_style(state: &str) -> Style {
    match state {
        "pending" => Style::default().fg(Color::Yellow),
        "in_progress" => Style::default().fg(Color::Cyan),
        "completed" => Style::default().fg(Color::Green),
        "failed" => Style::default().fg(Color::Red),
        "stuck" => Style::default().fg(Color::Magenta),
        _ => Style::default().fg(Color::DarkGray),
    }
}

/// Truncate to at most `max_chars` characters, appending "..." when cut.
pub fn truncate(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let end = input
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len());
    format!("{}...", &input[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_column_is_padded() {
        assert_eq!(level_column(&LogLevel::Info), "INFO ");
        assert_eq!(level_column(&LogLevel::Error), "ERROR");
        assert_eq!(level_column(&LogLevel::Other("fatal".to_string())), "FATAL");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
