//! Chat transcript state
//!
//! Holds the ordered message log, the single visible approval request and
//! the status line. All mutation goes through the methods here; the
//! renderer only reads.

use crate::events::ChatEvent;
use crate::types::{ApprovalDecision, ApprovalRequest, ChatMessage, HistoryResponse, Role};

/// Transient status shown under the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    /// Spinner semantics: work is still underway
    pub in_progress: bool,
}

/// Chat transcript with approval gate and status line.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    approval: Option<ApprovalRequest>,
    status: Option<StatusLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in display order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The approval request currently shown, if any
    pub fn approval(&self) -> Option<&ApprovalRequest> {
        self.approval.as_ref()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Start a user turn from raw input.
    ///
    /// Blank input is rejected and returns `None`. Otherwise the trimmed text
    /// is appended as a user message right away, the status becomes
    /// "Sending...", and the text to send is returned.
    pub fn begin_user_turn(&mut self, input: &str) -> Option<String> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }
        self.push(Role::User, content);
        self.set_status("Sending...", true);
        Some(content.to_string())
    }

    /// The send request for a user turn failed.
    pub fn user_turn_failed(&mut self, error: &str) {
        self.push(Role::System, format!("Failed to send: {}", error));
        self.clear_status();
    }

    /// Answer the visible approval request.
    ///
    /// The banner is dismissed immediately, whatever happens to the send.
    /// Returns the text to send as an ordinary turn.
    pub fn respond_to_approval(&mut self, decision: ApprovalDecision) -> String {
        self.approval = None;
        decision.as_message().to_string()
    }

    /// The send request for an approval answer failed.
    pub fn approval_failed(&mut self, error: &str) {
        self.push(Role::System, format!("Failed to send approval: {}", error));
    }

    /// Extend the last assistant message, or start one.
    pub fn append_streamed_chunk(&mut self, content: &str) {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => {
                last.content.push_str(content);
                last.is_stream_target = true;
            }
            _ => {
                let mut message = ChatMessage::new(Role::Assistant, content);
                message.is_stream_target = true;
                self.messages.push(message);
            }
        }
    }

    /// Append a system-role message.
    pub fn push_system(&mut self, content: impl Into<String>) {
        self.push(Role::System, content);
    }

    /// Apply one chat-channel event.
    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Response { content, .. } => {
                self.finish_assistant_turn(content);
                self.clear_status();
                // Any response dismisses the banner, related or not.
                self.approval = None;
            }
            ChatEvent::Thinking { message } => self.set_status(message, true),
            ChatEvent::ToolStarted { name } => {
                self.set_status(format!("Running tool: {}", name), true)
            }
            ChatEvent::ToolCompleted { name, success } => {
                let outcome = if success { "succeeded" } else { "failed" };
                self.set_status(format!("Tool {} {}", name, outcome), false);
            }
            ChatEvent::StreamChunk { content } => {
                self.append_streamed_chunk(&content);
                // Streamed output dismisses the banner too.
                self.approval = None;
            }
            ChatEvent::Status { message } => self.set_status(message, false),
            ChatEvent::ApprovalNeeded {
                request_id,
                tool_name,
                description,
                parameters,
            } => {
                self.approval = Some(ApprovalRequest {
                    request_id,
                    tool_name,
                    description,
                    parameters,
                });
            }
            ChatEvent::Error { message } => self.push(Role::System, format!("Error: {}", message)),
            ChatEvent::Heartbeat => {}
        }
    }

    /// Replace the transcript with the gateway's history of the active thread.
    pub fn load_history(&mut self, history: &HistoryResponse) {
        self.messages.clear();
        for turn in &history.turns {
            self.push(Role::User, turn.user_input.as_str());
            if let Some(response) = turn.response.as_deref().filter(|r| !r.is_empty()) {
                self.push(Role::Assistant, response);
            }
        }
    }

    /// Drop everything: messages, approval and status.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.approval = None;
        self.status = None;
    }

    fn finish_assistant_turn(&mut self, content: String) {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant && last.is_stream_target => {
                last.content = content;
                last.is_stream_target = false;
            }
            _ => self.push(Role::Assistant, content),
        }
    }

    fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
    }

    fn set_status(&mut self, text: impl Into<String>, in_progress: bool) {
        let text = text.into();
        if text.is_empty() {
            self.status = None;
        } else {
            self.status = Some(StatusLine { text, in_progress });
        }
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
