//! Core domain types for clawdash
//!
//! Two families live here:
//! - **Dashboard state records** owned by the state containers
//!   ([`ChatMessage`], [`ApprovalRequest`], [`LogRecord`])
//! - **Gateway DTOs** deserialized from the REST API (`*Response`, `*Info`)
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Turn** | One user input and the assistant output it produced |
//! | **Approval** | A tool call paused until the operator answers |
//! | **Memory** | The agent's workspace: a tree of paths, readable and searchable |
//! | **Job** | A long-running unit of agent work tracked by the gateway |
//! | **Extension** | An installable tool provider registered with the gateway |

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Chat
// ============================================

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// True while stream chunks are still being appended to this message
    pub is_stream_target: bool,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            is_stream_target: false,
        }
    }
}

/// A tool call waiting for the operator's decision.
///
/// Only the visible request is ever stored: a new request replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub request_id: Option<String>,
    pub tool_name: String,
    pub description: String,
    pub parameters: Option<String>,
}

impl ApprovalRequest {
    /// Banner text shown above the chat input.
    pub fn summary(&self) -> String {
        format!(
            "Tool \"{}\" requires approval: {}",
            self.tool_name, self.description
        )
    }
}

/// The operator's answer to an [`ApprovalRequest`].
///
/// Answers travel as ordinary chat turns; the gateway parses the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Always,
    Deny,
}

impl ApprovalDecision {
    pub fn as_message(&self) -> &'static str {
        match self {
            ApprovalDecision::Approve => "approve",
            ApprovalDecision::Always => "always",
            ApprovalDecision::Deny => "deny",
        }
    }
}

// ============================================
// Logs
// ============================================

/// Severity of a gateway log record.
///
/// Parsed case-insensitively; anything unrecognized is kept verbatim (lowercased).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Other(String),
}

impl LogLevel {
    /// Levels a filter can select, in cycling order.
    pub const FILTERABLE: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            other => LogLevel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Other(s) => s,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LogLevel::parse(&raw))
    }
}

/// A single record from the gateway's log channel. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogRecord {
    /// ISO-8601 timestamp as sent by the gateway
    pub timestamp: String,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

impl LogRecord {
    /// Wall-clock part of the timestamp (`HH:MM:SS.mmm`).
    ///
    /// Falls back to the raw text when the gateway sends something unparseable.
    pub fn clock_time(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.timestamp) {
            Ok(ts) => ts.format("%H:%M:%S%.3f").to_string(),
            Err(_) => self.timestamp.clone(),
        }
    }
}

// ============================================
// Chat API
// ============================================

/// Body of `POST /api/chat/send`.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<&'a str>,
}

/// Response from `POST /api/chat/send`
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub message_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadInfo {
    pub id: String,
    pub state: String,
    pub turn_count: usize,
    pub created_at: String,
    pub updated_at: String,
}

/// Response from `GET /api/chat/threads`
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadListResponse {
    pub threads: Vec<ThreadInfo>,
    pub active_thread: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TurnInfo {
    pub turn_number: usize,
    pub user_input: String,
    pub response: Option<String>,
    #[serde(default)]
    pub state: String,
}

/// Response from `GET /api/chat/history`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub thread_id: String,
    pub turns: Vec<TurnInfo>,
}

// ============================================
// Memory API
// ============================================

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
}

/// Response from `GET /api/memory/list?path=`
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryListResponse {
    pub entries: Vec<ListEntry>,
}

/// Response from `GET /api/memory/read?path=`
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryReadResponse {
    pub content: String,
}

/// Body of `POST /api/memory/search`.
#[derive(Debug, Serialize)]
pub struct MemorySearchRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// Response from `POST /api/memory/search`
#[derive(Debug, Clone, Deserialize)]
pub struct MemorySearchResponse {
    pub results: Vec<SearchHit>,
}

// ============================================
// Jobs API
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct JobInfo {
    pub id: String,
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub user_id: String,
    pub created_at: Option<String>,
    pub started_at: Option<String>,
}

impl JobInfo {
    /// First 8 characters of the id, for compact tables.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    /// Only queued or running jobs can be cancelled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self.state.as_str(), "pending" | "in_progress")
    }

    /// Creation time in local time, or `-` when unknown.
    pub fn created_display(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| {
                ts.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Response from `GET /api/jobs`
#[derive(Debug, Clone, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobInfo>,
}

/// Response from `GET /api/jobs/summary`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobSummaryResponse {
    pub total: usize,
    #[serde(default)]
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    pub stuck: usize,
}

// ============================================
// Extensions API
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionInfo {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub authenticated: bool,
    pub active: bool,
    #[serde(default)]
    pub tools: Vec<String>,
}

/// Response from `GET /api/extensions`
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionListResponse {
    pub extensions: Vec<ExtensionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Response from `GET /api/extensions/tools`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolInfo>,
}

/// Response from extension activate/remove.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse_is_case_insensitive() {
        assert_eq!(LogLevel::parse("INFO"), LogLevel::Info);
        assert_eq!(LogLevel::parse(" Warn "), LogLevel::Warn);
        assert_eq!(LogLevel::parse("WARNING"), LogLevel::Warn);
        assert_eq!(
            LogLevel::parse("Critical"),
            LogLevel::Other("critical".to_string())
        );
    }

    #[test]
    fn test_log_record_from_json() {
        let record: LogRecord = serde_json::from_value(serde_json::json!({
            "timestamp": "2026-01-02T03:04:05.678Z",
            "level": "ERROR",
            "target": "gateway::sse",
            "message": "boom",
        }))
        .unwrap();
        assert_eq!(record.level, LogLevel::Error);
        assert_eq!(record.clock_time(), "03:04:05.678");
    }

    #[test]
    fn test_clock_time_falls_back_to_raw() {
        let record = LogRecord {
            timestamp: "yesterday".to_string(),
            level: LogLevel::Info,
            target: "t".to_string(),
            message: "m".to_string(),
        };
        assert_eq!(record.clock_time(), "yesterday");
    }

    #[test]
    fn test_job_helpers() {
        let job = JobInfo {
            id: "0123456789abcdef".to_string(),
            title: "Index repo".to_string(),
            state: "in_progress".to_string(),
            user_id: String::new(),
            created_at: None,
            started_at: None,
        };
        assert_eq!(job.short_id(), "01234567");
        assert!(job.is_cancellable());
        assert_eq!(job.created_display(), "-");

        let done = JobInfo {
            state: "completed".to_string(),
            id: "abc".to_string(),
            ..job
        };
        assert_eq!(done.short_id(), "abc");
        assert!(!done.is_cancellable());
    }

    #[test]
    fn test_approval_summary() {
        let req = ApprovalRequest {
            request_id: None,
            tool_name: "shell".to_string(),
            description: "rm -rf build".to_string(),
            parameters: None,
        };
        assert_eq!(
            req.summary(),
            "Tool \"shell\" requires approval: rm -rf build"
        );
    }
}
