//! Dashboard state and its transitions
//!
//! [`Dashboard`] owns every state container (transcript, logs, memory, jobs,
//! extensions) and the connection indicators. It is the only mutator: user
//! actions are methods, async completions arrive as [`Update`]s through
//! [`Dashboard::apply`], and anything that needs the network comes back out
//! as a [`Command`] for the session to run. No I/O happens here.

use std::time::Instant;

use crate::channel::{ChannelSignal, ChannelUpdate, ConnectionState};
use crate::command::{Command, ExtensionAction, SendPurpose, Update};
use crate::config::Config;
use crate::events::{ChannelKind, ServerEvent};
use crate::extensions::{action_failure, ExtensionsPanel};
use crate::jobs::JobsPanel;
use crate::logs::{LevelFilter, LogBuffer, LogFilter};
use crate::memory::MemoryPanel;
use crate::transcript::Transcript;
use crate::types::ApprovalDecision;

#[derive(Debug)]
pub struct Dashboard {
    transcript: Transcript,
    logs: LogBuffer,
    memory: MemoryPanel,
    jobs: JobsPanel,
    extensions: ExtensionsPanel,
    chat_state: ConnectionState,
    logs_state: ConnectionState,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        Self {
            transcript: Transcript::new(),
            logs: LogBuffer::new(config.logs.capacity, config.logs.pause_buffer_limit),
            memory: MemoryPanel::new(&config.memory),
            jobs: JobsPanel::new(),
            extensions: ExtensionsPanel::new(),
            chat_state: ConnectionState::Closed,
            logs_state: ConnectionState::Closed,
        }
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn memory(&self) -> &MemoryPanel {
        &self.memory
    }

    pub fn jobs(&self) -> &JobsPanel {
        &self.jobs
    }

    pub fn extensions(&self) -> &ExtensionsPanel {
        &self.extensions
    }

    pub fn connection_state(&self, kind: ChannelKind) -> ConnectionState {
        match kind {
            ChannelKind::Chat => self.chat_state,
            ChannelKind::Logs => self.logs_state,
        }
    }

    // ========================================
    // Lifecycle
    // ========================================

    /// Everything to do once authenticated: open both channels, load the
    /// chat history, the memory root and the jobs list.
    pub fn start(&mut self) -> Vec<Command> {
        let mut commands = self.reconnect();
        commands.push(Command::LoadHistory);
        commands.push(self.memory.load_root());
        commands.push(self.jobs.refresh());
        commands
    }

    /// Reopen both push channels.
    pub fn reconnect(&mut self) -> Vec<Command> {
        self.chat_state = ConnectionState::Connecting;
        self.logs_state = ConnectionState::Connecting;
        vec![
            Command::Connect(ChannelKind::Chat),
            Command::Connect(ChannelKind::Logs),
        ]
    }

    // ========================================
    // Chat
    // ========================================

    /// Send operator input as a new turn. Blank input does nothing.
    pub fn send_user_message(&mut self, input: &str) -> Option<Command> {
        let content = self.transcript.begin_user_turn(input)?;
        Some(Command::SendMessage {
            content,
            purpose: SendPurpose::Turn,
        })
    }

    /// Answer the visible approval request, if there is one.
    pub fn respond_to_approval(&mut self, decision: ApprovalDecision) -> Option<Command> {
        self.transcript.approval()?;
        let content = self.transcript.respond_to_approval(decision);
        Some(Command::SendMessage {
            content,
            purpose: SendPurpose::Approval,
        })
    }

    // ========================================
    // Logs
    // ========================================

    pub fn toggle_log_pause(&mut self) {
        self.logs.toggle_pause();
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    pub fn set_log_filter(&mut self, filter: LogFilter) {
        self.logs.set_filter(filter);
    }

    pub fn set_log_level(&mut self, level: LevelFilter) {
        let filter = self.logs.filter().with_level(level);
        self.logs.set_filter(filter);
    }

    pub fn cycle_log_level(&mut self) {
        let level = self.logs.filter().level().cycle();
        self.set_log_level(level);
    }

    pub fn set_log_target(&mut self, target: &str) {
        let filter = self.logs.filter().with_target(target);
        self.logs.set_filter(filter);
    }

    // ========================================
    // Memory
    // ========================================

    pub fn reload_memory(&mut self) -> Command {
        self.memory.load_root()
    }

    pub fn toggle_node(&mut self, path: &str) -> Option<Command> {
        self.memory.toggle(path)
    }

    pub fn open_file(&mut self, path: &str) -> Command {
        self.memory.open(path)
    }

    pub fn close_file(&mut self) {
        self.memory.close_file();
    }

    pub fn set_search_query(&mut self, query: &str, now: Instant) -> Option<Command> {
        self.memory.set_query(query, now)
    }

    /// Advance timers. Call regularly from the UI loop.
    pub fn tick(&mut self, now: Instant) -> Option<Command> {
        self.memory.tick(now)
    }

    /// The next instant [`Dashboard::tick`] has work to do, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.memory.search_deadline()
    }

    // ========================================
    // Jobs and extensions
    // ========================================

    pub fn refresh_jobs(&mut self) -> Command {
        self.jobs.refresh()
    }

    pub fn cancel_job(&self, id: &str) -> Option<Command> {
        self.jobs.cancel(id)
    }

    pub fn refresh_extensions(&self) -> Command {
        self.extensions.refresh()
    }

    pub fn extension_action(&self, action: ExtensionAction, name: &str) -> Command {
        self.extensions.request(action, name)
    }

    // ========================================
    // Completions
    // ========================================

    /// Apply one async completion or push delivery. Returns follow-up work.
    pub fn apply(&mut self, update: Update) -> Vec<Command> {
        match update {
            Update::Channel(update) => {
                self.apply_channel(update);
                Vec::new()
            }
            Update::Sent { purpose, result } => {
                if let Err(error) = result {
                    tracing::warn!(?purpose, error = %error, "Chat send failed");
                    match purpose {
                        SendPurpose::Turn => self.transcript.user_turn_failed(&error),
                        SendPurpose::Approval => self.transcript.approval_failed(&error),
                    }
                }
                Vec::new()
            }
            Update::History(result) => {
                match result {
                    Ok(history) => self.transcript.load_history(&history),
                    // No active thread yet is normal.
                    Err(error) => tracing::debug!(error = %error, "No chat history loaded"),
                }
                Vec::new()
            }
            update @ (Update::MemoryListed { .. }
            | Update::MemoryRead { .. }
            | Update::SearchCompleted { .. }) => {
                if !self.memory.apply(update) {
                    tracing::debug!("Dropped stale memory response");
                }
                Vec::new()
            }
            Update::JobsLoaded(result) => {
                self.jobs.apply_loaded(result);
                Vec::new()
            }
            Update::JobCancelled { id, result } => match result {
                Ok(()) => {
                    tracing::info!(job_id = %id, "Job cancelled");
                    vec![self.jobs.refresh()]
                }
                Err(error) => {
                    self.transcript
                        .push_system(format!("Failed to cancel job: {}", error));
                    Vec::new()
                }
            },
            Update::ExtensionsLoaded { extensions, tools } => {
                self.extensions.apply_loaded(extensions, tools);
                Vec::new()
            }
            Update::ExtensionActionDone {
                action,
                name,
                result,
            } => {
                if let Some(message) = action_failure(action, &result) {
                    tracing::warn!(extension = %name, "{}", message);
                    self.transcript.push_system(message);
                }
                match result {
                    Ok(_) => vec![self.extensions.refresh()],
                    Err(_) => Vec::new(),
                }
            }
        }
    }

    fn apply_channel(&mut self, update: ChannelUpdate) {
        let state = match update.kind {
            ChannelKind::Chat => &mut self.chat_state,
            ChannelKind::Logs => &mut self.logs_state,
        };
        match update.signal {
            ChannelSignal::Opened => *state = ConnectionState::Open,
            ChannelSignal::Reconnecting { error } => {
                tracing::debug!(
                    channel = update.kind.as_str(),
                    error = %error,
                    "Channel reconnecting"
                );
                *state = ConnectionState::Reconnecting;
            }
            ChannelSignal::Event(ServerEvent::Chat(event)) => self.transcript.apply(event),
            ChannelSignal::Event(ServerEvent::Log(record)) => self.logs.ingest(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChatEvent;
    use crate::types::{ChatMessage, LogLevel, LogRecord, Role};

    fn chat(event: ChatEvent) -> Update {
        Update::Channel(ChannelUpdate {
            kind: ChannelKind::Chat,
            generation: 1,
            signal: ChannelSignal::Event(ServerEvent::Chat(event)),
        })
    }

    fn log(level: LogLevel, target: &str) -> Update {
        Update::Channel(ChannelUpdate {
            kind: ChannelKind::Logs,
            generation: 1,
            signal: ChannelSignal::Event(ServerEvent::Log(LogRecord {
                timestamp: "2026-01-01T12:00:00Z".to_string(),
                level,
                target: target.to_string(),
                message: format!("from {}", target),
            })),
        })
    }

    fn approval() -> Update {
        chat(ChatEvent::ApprovalNeeded {
            request_id: Some("req-1".to_string()),
            tool_name: "shell".to_string(),
            description: "rm -rf build".to_string(),
            parameters: None,
        })
    }

    #[test]
    fn test_start_opens_channels_and_loads_panels() {
        let mut dashboard = Dashboard::default();
        let commands = dashboard.start();
        assert_eq!(commands[0], Command::Connect(ChannelKind::Chat));
        assert_eq!(commands[1], Command::Connect(ChannelKind::Logs));
        assert!(commands.contains(&Command::LoadHistory));
        assert!(commands.contains(&Command::LoadJobs));
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::ListMemory { path, .. } if path.is_empty())));
        assert_eq!(
            dashboard.connection_state(ChannelKind::Chat),
            ConnectionState::Connecting
        );
    }

    #[test]
    fn test_send_then_response_round_trip() {
        let mut dashboard = Dashboard::default();
        let command = dashboard.send_user_message("hello");
        assert_eq!(
            command,
            Some(Command::SendMessage {
                content: "hello".to_string(),
                purpose: SendPurpose::Turn,
            })
        );
        assert_eq!(
            dashboard.transcript().messages(),
            &[ChatMessage::new(Role::User, "hello")]
        );
        assert_eq!(dashboard.transcript().status().unwrap().text, "Sending...");

        dashboard.apply(chat(ChatEvent::Response {
            content: "hi".to_string(),
            thread_id: None,
        }));
        assert_eq!(
            dashboard.transcript().messages(),
            &[
                ChatMessage::new(Role::User, "hello"),
                ChatMessage::new(Role::Assistant, "hi"),
            ]
        );
        assert!(dashboard.transcript().status().is_none());
    }

    #[test]
    fn test_blank_message_issues_nothing() {
        let mut dashboard = Dashboard::default();
        assert_eq!(dashboard.send_user_message("  \n "), None);
        assert!(dashboard.transcript().messages().is_empty());
    }

    #[test]
    fn test_send_failure_reports_and_clears_status() {
        let mut dashboard = Dashboard::default();
        dashboard.send_user_message("hello");
        dashboard.apply(Update::Sent {
            purpose: SendPurpose::Turn,
            result: Err("503 Service Unavailable".to_string()),
        });
        let last = dashboard.transcript().messages().last().unwrap();
        assert_eq!(last.role, Role::System);
        assert_eq!(last.content, "Failed to send: 503 Service Unavailable");
        assert!(dashboard.transcript().status().is_none());
    }

    #[test]
    fn test_approval_dismissed_before_send_completes() {
        let mut dashboard = Dashboard::default();
        assert_eq!(dashboard.respond_to_approval(ApprovalDecision::Approve), None);

        dashboard.apply(approval());
        let command = dashboard.respond_to_approval(ApprovalDecision::Always);
        assert_eq!(
            command,
            Some(Command::SendMessage {
                content: "always".to_string(),
                purpose: SendPurpose::Approval,
            })
        );
        assert!(dashboard.transcript().approval().is_none());

        dashboard.apply(Update::Sent {
            purpose: SendPurpose::Approval,
            result: Err("timed out".to_string()),
        });
        assert_eq!(
            dashboard.transcript().messages().last().unwrap().content,
            "Failed to send approval: timed out"
        );
        assert!(dashboard.transcript().approval().is_none());
    }

    #[test]
    fn test_unrelated_response_dismisses_approval() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(approval());
        assert!(dashboard.transcript().approval().is_some());
        dashboard.apply(chat(ChatEvent::Response {
            content: "done".to_string(),
            thread_id: None,
        }));
        assert!(dashboard.transcript().approval().is_none());
    }

    #[test]
    fn test_log_level_filter_end_to_end() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(log(LogLevel::Info, "a.b"));
        dashboard.apply(log(LogLevel::Error, "c.d"));
        dashboard.apply(log(LogLevel::Info, "a.b"));

        dashboard.set_log_filter(LogFilter::new(LevelFilter::Only(LogLevel::Error), ""));
        let visible: Vec<&str> = dashboard.logs().visible().map(|r| r.target.as_str()).collect();
        assert_eq!(visible, vec!["c.d"]);

        dashboard.set_log_target("a");
        assert_eq!(dashboard.logs().visible_count(), 0);
        dashboard.set_log_target("");
        let visible: Vec<&str> = dashboard.logs().visible().map(|r| r.target.as_str()).collect();
        assert_eq!(visible, vec!["c.d"]);
        assert_eq!(dashboard.logs().len(), 3);
    }

    #[test]
    fn test_paused_logs_replay_on_resume() {
        let mut dashboard = Dashboard::default();
        dashboard.toggle_log_pause();
        dashboard.apply(log(LogLevel::Warn, "x"));
        assert_eq!(dashboard.logs().len(), 0);
        dashboard.toggle_log_pause();
        assert_eq!(dashboard.logs().len(), 1);
    }

    #[test]
    fn test_channel_signals_drive_connection_state() {
        let mut dashboard = Dashboard::default();
        dashboard.reconnect();
        dashboard.apply(Update::Channel(ChannelUpdate {
            kind: ChannelKind::Logs,
            generation: 1,
            signal: ChannelSignal::Opened,
        }));
        assert_eq!(dashboard.connection_state(ChannelKind::Logs), ConnectionState::Open);
        assert_eq!(
            dashboard.connection_state(ChannelKind::Chat),
            ConnectionState::Connecting
        );

        dashboard.apply(Update::Channel(ChannelUpdate {
            kind: ChannelKind::Logs,
            generation: 1,
            signal: ChannelSignal::Reconnecting {
                error: "reset".to_string(),
            },
        }));
        assert_eq!(
            dashboard.connection_state(ChannelKind::Logs),
            ConnectionState::Reconnecting
        );
    }

    #[test]
    fn test_job_cancel_outcomes() {
        let mut dashboard = Dashboard::default();
        let follow_up = dashboard.apply(Update::JobCancelled {
            id: "j1".to_string(),
            result: Ok(()),
        });
        assert_eq!(follow_up, vec![Command::LoadJobs]);

        let follow_up = dashboard.apply(Update::JobCancelled {
            id: "j1".to_string(),
            result: Err("404 Not Found".to_string()),
        });
        assert!(follow_up.is_empty());
        assert_eq!(
            dashboard.transcript().messages().last().unwrap().content,
            "Failed to cancel job: 404 Not Found"
        );
    }

    #[test]
    fn test_extension_refusal_reports_and_reloads() {
        let mut dashboard = Dashboard::default();
        let follow_up = dashboard.apply(Update::ExtensionActionDone {
            action: ExtensionAction::Activate,
            name: "github".to_string(),
            result: Ok(crate::types::ActionResponse {
                success: false,
                message: "needs auth".to_string(),
            }),
        });
        assert_eq!(follow_up, vec![Command::LoadExtensions]);
        assert_eq!(
            dashboard.transcript().messages().last().unwrap().content,
            "Activate failed: needs auth"
        );
    }

    #[test]
    fn test_debounced_search_through_tick() {
        let mut dashboard = Dashboard::default();
        let t0 = Instant::now();
        assert!(dashboard.set_search_query("notes", t0).is_none());
        assert!(dashboard.tick(t0).is_none());
        let fired = dashboard.tick(t0 + std::time::Duration::from_millis(300));
        assert!(matches!(fired, Some(Command::SearchMemory { ref query, .. }) if query == "notes"));
    }
}
