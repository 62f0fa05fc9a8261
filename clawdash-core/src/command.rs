//! Work requested by the dashboard and results reported back to it
//!
//! [`Command`]s flow out of [`crate::Dashboard`] methods and are executed by
//! [`crate::Session`]. Every async completion comes back as an [`Update`].
//! Failures travel as display strings: they are shown to the operator, never
//! matched on.

use crate::channel::ChannelUpdate;
use crate::events::ChannelKind;
use crate::types::{
    ActionResponse, ExtensionInfo, HistoryResponse, JobInfo, JobSummaryResponse, ListEntry,
    SearchHit, ToolInfo,
};

/// Why a chat message is being sent. Both go through the same endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPurpose {
    Turn,
    Approval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionAction {
    Activate,
    Remove,
}

impl ExtensionAction {
    pub fn label(&self) -> &'static str {
        match self {
            ExtensionAction::Activate => "Activate",
            ExtensionAction::Remove => "Remove",
        }
    }
}

/// A side effect for the session to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// (Re)open a push channel
    Connect(ChannelKind),
    LoadHistory,
    SendMessage {
        content: String,
        purpose: SendPurpose,
    },
    /// List a memory directory; the empty path is the root
    ListMemory {
        path: String,
        generation: u64,
    },
    ReadMemory {
        path: String,
        generation: u64,
    },
    SearchMemory {
        query: String,
        limit: usize,
        generation: u64,
    },
    LoadJobs,
    CancelJob {
        id: String,
    },
    LoadExtensions,
    ExtensionAction {
        action: ExtensionAction,
        name: String,
    },
}

/// The outcome of a command, or a push-channel delivery.
#[derive(Debug, Clone)]
pub enum Update {
    Channel(ChannelUpdate),
    Sent {
        purpose: SendPurpose,
        result: Result<(), String>,
    },
    History(Result<HistoryResponse, String>),
    MemoryListed {
        path: String,
        generation: u64,
        result: Result<Vec<ListEntry>, String>,
    },
    MemoryRead {
        path: String,
        generation: u64,
        result: Result<String, String>,
    },
    SearchCompleted {
        generation: u64,
        result: Result<Vec<SearchHit>, String>,
    },
    JobsLoaded(Result<(JobSummaryResponse, Vec<JobInfo>), String>),
    JobCancelled {
        id: String,
        result: Result<(), String>,
    },
    /// Each list falls back to empty on its own failure
    ExtensionsLoaded {
        extensions: Vec<ExtensionInfo>,
        tools: Vec<ToolInfo>,
    },
    ExtensionActionDone {
        action: ExtensionAction,
        name: String,
        result: Result<ActionResponse, String>,
    },
}
