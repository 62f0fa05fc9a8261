//! Typed push-channel events
//!
//! The gateway sends one named event per server-sent-events message, with a
//! JSON payload whose shape is fixed by the name. Decoding dispatches on the
//! name first; unknown names are dropped explicitly rather than guessed at.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::LogRecord;

/// Which logical push channel an event arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Chat,
    Logs,
}

impl ChannelKind {
    /// Path of the event stream relative to the gateway base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ChannelKind::Chat => "/api/chat/events",
            ChannelKind::Logs => "/api/logs/events",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Chat => "chat",
            ChannelKind::Logs => "logs",
        }
    }
}

/// Events carried by the chat channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// Final assistant text for the current turn
    Response {
        content: String,
        #[serde(default)]
        thread_id: Option<String>,
    },
    Thinking {
        message: String,
    },
    ToolStarted {
        name: String,
    },
    ToolCompleted {
        name: String,
        success: bool,
    },
    /// Incremental assistant text
    StreamChunk {
        content: String,
    },
    Status {
        message: String,
    },
    ApprovalNeeded {
        #[serde(default)]
        request_id: Option<String>,
        tool_name: String,
        description: String,
        #[serde(default)]
        parameters: Option<String>,
    },
    Error {
        message: String,
    },
    /// Keep-alive; carries nothing
    Heartbeat,
}

impl ChatEvent {
    /// Event names the chat channel understands.
    pub const NAMES: [&'static str; 9] = [
        "response",
        "thinking",
        "tool_started",
        "tool_completed",
        "stream_chunk",
        "status",
        "approval_needed",
        "error",
        "heartbeat",
    ];
}

/// A decoded event from either channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Chat(ChatEvent),
    Log(LogRecord),
}

/// Decode one raw event.
///
/// Returns `Ok(None)` for names that do not belong to `kind` and for an
/// `error` event without a payload. A known name with a malformed payload is
/// an [`Error::Decode`].
pub fn decode(kind: ChannelKind, name: &str, data: &str) -> Result<Option<ServerEvent>> {
    match kind {
        ChannelKind::Chat => decode_chat(name, data).map(|ev| ev.map(ServerEvent::Chat)),
        ChannelKind::Logs => decode_log(name, data).map(|ev| ev.map(ServerEvent::Log)),
    }
}

fn decode_chat(name: &str, data: &str) -> Result<Option<ChatEvent>> {
    if !ChatEvent::NAMES.contains(&name) {
        tracing::debug!(event = %name, "Ignoring unknown chat event");
        return Ok(None);
    }

    let data = data.trim();
    if data.is_empty() {
        return match name {
            "heartbeat" => Ok(Some(ChatEvent::Heartbeat)),
            "error" => Ok(None),
            _ => Err(decode_error(name, "missing payload")),
        };
    }

    let mut payload: Value =
        serde_json::from_str(data).map_err(|e| decode_error(name, e.to_string()))?;
    let Some(fields) = payload.as_object_mut() else {
        return Err(decode_error(name, "payload is not a JSON object"));
    };
    // The event name is authoritative, whatever the payload claims.
    fields.insert("type".to_string(), Value::String(name.to_string()));

    serde_json::from_value(payload)
        .map(Some)
        .map_err(|e| decode_error(name, e.to_string()))
}

fn decode_log(name: &str, data: &str) -> Result<Option<LogRecord>> {
    if name != "log" {
        tracing::debug!(event = %name, "Ignoring unknown log event");
        return Ok(None);
    }
    serde_json::from_str(data)
        .map(Some)
        .map_err(|e| decode_error(name, e.to_string()))
}

fn decode_error(event: &str, message: impl Into<String>) -> Error {
    Error::Decode {
        event: event.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;

    fn chat(name: &str, data: &str) -> Option<ChatEvent> {
        match decode(ChannelKind::Chat, name, data).unwrap() {
            Some(ServerEvent::Chat(ev)) => Some(ev),
            Some(other) => panic!("unexpected event {other:?}"),
            None => None,
        }
    }

    #[test]
    fn test_decode_response() {
        let ev = chat("response", r#"{"content":"hi","thread_id":"t1"}"#).unwrap();
        assert_eq!(
            ev,
            ChatEvent::Response {
                content: "hi".to_string(),
                thread_id: Some("t1".to_string())
            }
        );
    }

    #[test]
    fn test_name_wins_over_embedded_type() {
        let ev = chat("status", r#"{"type":"thinking","message":"Compacting"}"#).unwrap();
        assert_eq!(
            ev,
            ChatEvent::Status {
                message: "Compacting".to_string()
            }
        );
    }

    #[test]
    fn test_decode_approval_with_optional_fields_missing() {
        let ev = chat(
            "approval_needed",
            r#"{"tool_name":"shell","description":"run ls"}"#,
        )
        .unwrap();
        assert_eq!(
            ev,
            ChatEvent::ApprovalNeeded {
                request_id: None,
                tool_name: "shell".to_string(),
                description: "run ls".to_string(),
                parameters: None,
            }
        );
    }

    #[test]
    fn test_error_without_payload_is_ignored() {
        assert_eq!(chat("error", ""), None);
        assert_eq!(
            chat("error", r#"{"message":"rate limited"}"#),
            Some(ChatEvent::Error {
                message: "rate limited".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        assert_eq!(chat("job_progress", r#"{"pct":10}"#), None);
        assert!(decode(ChannelKind::Logs, "response", r#"{"content":"x"}"#)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_heartbeat_with_and_without_payload() {
        assert_eq!(chat("heartbeat", ""), Some(ChatEvent::Heartbeat));
        assert_eq!(chat("heartbeat", "{}"), Some(ChatEvent::Heartbeat));
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let err = decode(ChannelKind::Chat, "tool_completed", r#"{"name":"x"}"#).unwrap_err();
        assert!(matches!(err, Error::Decode { ref event, .. } if event == "tool_completed"));
        assert!(decode(ChannelKind::Chat, "thinking", "not json").is_err());
        assert!(decode(ChannelKind::Chat, "thinking", "[1,2]").is_err());
    }

    #[test]
    fn test_decode_log_record() {
        let ev = decode(
            ChannelKind::Logs,
            "log",
            r#"{"timestamp":"2026-01-01T00:00:00Z","level":"warn","target":"a","message":"x"}"#,
        )
        .unwrap()
        .unwrap();
        match ev {
            ServerEvent::Log(record) => {
                assert_eq!(record.level, LogLevel::Warn);
                assert_eq!(record.target, "a");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
