//! Logical push channels
//!
//! An [`EventChannel`] owns at most one running transport task. Connecting
//! again aborts the previous task first and starts a new *generation*; any
//! update still queued from an older generation is rejected by
//! [`EventChannel::accept`], so a reconnect can never interleave two streams.

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::events::{self, ChannelKind, ServerEvent};
use crate::sse::{SseTransport, TransportSignal};

/// Connection state as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Reconnecting,
    Closed,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Open => "Connected",
            ConnectionState::Reconnecting => "Reconnecting...",
            ConnectionState::Closed => "Disconnected",
        }
    }
}

/// A decoded, channel-level signal.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSignal {
    Opened,
    Reconnecting { error: String },
    Event(ServerEvent),
}

/// A signal tagged with the channel and generation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelUpdate {
    pub kind: ChannelKind,
    pub generation: u64,
    pub signal: ChannelSignal,
}

/// One logical server-push channel (chat or logs).
///
/// Only tracks which connection is current. The operator-facing
/// [`ConnectionState`] is derived from the admitted updates by the dashboard.
pub struct EventChannel {
    kind: ChannelKind,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl EventChannel {
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            generation: 0,
            task: None,
        }
    }

    /// A connection task is running (or reconnecting).
    pub fn is_live(&self) -> bool {
        self.task.is_some()
    }

    /// (Re)connect. Any existing connection is closed before the new one starts.
    ///
    /// `sink` receives every update of the new generation and returns `false`
    /// once nobody is listening, which stops the task.
    pub fn connect<F>(&mut self, handle: &Handle, transport: SseTransport, mut sink: F)
    where
        F: FnMut(ChannelUpdate) -> bool + Send + 'static,
    {
        let generation = self.begin_generation();
        let kind = self.kind;

        tracing::info!(channel = kind.as_str(), generation, "Connecting push channel");

        let task = handle.spawn(async move {
            transport
                .run(kind, |signal| {
                    let signal = match signal {
                        TransportSignal::Opened => ChannelSignal::Opened,
                        TransportSignal::Dropped { error } => ChannelSignal::Reconnecting { error },
                        TransportSignal::Event { name, data } => {
                            match events::decode(kind, &name, &data) {
                                Ok(Some(event)) => ChannelSignal::Event(event),
                                Ok(None) => return true,
                                Err(e) => {
                                    tracing::warn!(
                                        channel = kind.as_str(),
                                        error = %e,
                                        "Dropping malformed event"
                                    );
                                    return true;
                                }
                            }
                        }
                    };
                    sink(ChannelUpdate {
                        kind,
                        generation,
                        signal,
                    })
                })
                .await;
            tracing::debug!(channel = kind.as_str(), generation, "Push channel task finished");
        });
        self.task = Some(task);
    }

    /// Stop the current connection, if any.
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether an update belongs to the live connection.
    pub fn accept(&self, update: &ChannelUpdate) -> bool {
        update.kind == self.kind && update.generation == self.generation && self.is_live()
    }

    fn begin_generation(&mut self) -> u64 {
        self.close();
        self.generation += 1;
        self.generation
    }
}

impl Drop for EventChannel {
    fn drop(&mut self) {
        self.close();
    }
}
