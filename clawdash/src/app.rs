//! Application state for the TUI.
//!
//! [`App`] wraps the core [`Dashboard`] with view-only state: the active tab,
//! selections, scroll offsets and text inputs. Key handlers mutate it and
//! return the [`Command`]s the main loop must hand to the session.

mod chat;
mod extensions;
mod jobs;
mod logs;
mod memory;

use std::time::{Duration, Instant};

use clawdash_core::{ApprovalDecision, Command, Config, Dashboard, ExtensionAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

/// Longest the main loop blocks waiting for input.
pub const MAX_POLL: Duration = Duration::from_millis(100);

/// Top-level tabs, in cycling order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Chat,
    Memory,
    Jobs,
    Logs,
    Extensions,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Chat, Tab::Memory, Tab::Jobs, Tab::Logs, Tab::Extensions];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Memory => "Memory",
            Tab::Jobs => "Jobs",
            Tab::Logs => "Logs",
            Tab::Extensions => "Extensions",
        }
    }

    pub fn next(&self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| t == self).unwrap_or(0);
        Tab::ALL[(idx + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| t == self).unwrap_or(0);
        Tab::ALL[(idx + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Main application state.
pub struct App {
    /// All domain state; the UI only reads it
    pub dashboard: Dashboard,
    /// Currently visible tab
    pub tab: Tab,
    /// Set when the user asks to quit
    pub should_quit: bool,

    // ----- Chat -----
    /// Text being composed
    pub chat_input: String,
    /// Lines scrolled up from the bottom of the transcript
    pub chat_scroll: usize,

    // ----- Memory -----
    /// Selected row in the tree or result list
    pub memory_selected: usize,
    /// The search box has focus
    pub memory_search_editing: bool,
    /// Scroll offset of the file viewer
    pub viewer_scroll: u16,

    // ----- Logs -----
    /// The target filter box has focus
    pub log_target_editing: bool,
    /// Target filter as typed
    pub log_target_input: String,
    /// Stick to the newest record
    pub log_follow: bool,
    /// Records scrolled up from the newest when not following
    pub log_scroll: usize,

    // ----- Jobs / Extensions -----
    pub jobs_state: TableState,
    pub extensions_state: TableState,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            dashboard: Dashboard::new(config),
            tab: Tab::Chat,
            should_quit: false,
            chat_input: String::new(),
            chat_scroll: 0,
            memory_selected: 0,
            memory_search_editing: false,
            viewer_scroll: 0,
            log_target_editing: false,
            log_target_input: String::new(),
            log_follow: true,
            log_scroll: 0,
            jobs_state: TableState::default(),
            extensions_state: TableState::default(),
        }
    }

    /// Initial work after authentication.
    pub fn start(&mut self) -> Vec<Command> {
        self.dashboard.start()
    }

    /// Advance timers.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        self.dashboard.tick(now).into_iter().collect()
    }

    /// How long to wait for input before the next tick is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.dashboard.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(MAX_POLL),
            None => MAX_POLL,
        }
    }

    /// Whether keystrokes currently go into a text field.
    pub fn is_editing(&self) -> bool {
        match self.tab {
            Tab::Chat => true,
            Tab::Memory => self.memory_search_editing,
            Tab::Logs => self.log_target_editing,
            Tab::Jobs | Tab::Extensions => false,
        }
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global bindings
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return Vec::new();
            }
            KeyCode::Char('r') if ctrl => {
                tracing::info!("Reconnecting push channels");
                return self.dashboard.reconnect();
            }
            KeyCode::Tab => return self.switch_tab(self.tab.next()),
            KeyCode::BackTab => return self.switch_tab(self.tab.previous()),
            KeyCode::Char('q') if !self.is_editing() => {
                self.should_quit = true;
                return Vec::new();
            }
            _ => {}
        }

        match self.tab {
            Tab::Chat => self.handle_chat_key(key),
            Tab::Memory => self.handle_memory_key(key),
            Tab::Jobs => self.handle_jobs_key(key),
            Tab::Logs => self.handle_logs_key(key),
            Tab::Extensions => self.handle_extensions_key(key),
        }
    }

    /// Show another tab. Memory, jobs and extensions reload on entry.
    pub fn switch_tab(&mut self, tab: Tab) -> Vec<Command> {
        if tab == self.tab {
            return Vec::new();
        }
        tracing::debug!(from = self.tab.title(), to = tab.title(), "Switching tab");
        self.tab = tab;
        match tab {
            Tab::Memory => {
                self.memory_selected = 0;
                vec![self.dashboard.reload_memory()]
            }
            Tab::Jobs => vec![self.dashboard.refresh_jobs()],
            Tab::Extensions => vec![self.dashboard.refresh_extensions()],
            Tab::Chat | Tab::Logs => Vec::new(),
        }
    }
}

/// Move a table selection by `delta`, clamped to `len`. An empty selection
/// lands on the first row.
fn step_selection(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let next = match state.selected() {
        Some(current) => (current as isize + delta).clamp(0, len as isize - 1) as usize,
        None => 0,
    };
    state.select(Some(next));
}
