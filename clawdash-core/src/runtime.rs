//! Command execution
//!
//! [`Session`] runs [`Command`]s as tokio tasks and reports each outcome as
//! an [`Update`] on an unbounded channel. The receiving side is drained by
//! the UI loop, which applies updates one at a time, so all state mutation
//! stays on one thread. Push-channel deliveries go through
//! [`Session::admit`] first, which drops anything from a superseded
//! connection.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::GatewayClient;
use crate::channel::EventChannel;
use crate::command::{Command, ExtensionAction, Update};
use crate::events::ChannelKind;
use crate::sse::SseTransport;

pub struct Session {
    client: GatewayClient,
    transport: SseTransport,
    handle: Handle,
    tx: UnboundedSender<Update>,
    chat: EventChannel,
    logs: EventChannel,
}

impl Session {
    /// Create a session and the receiver its updates arrive on.
    pub fn new(
        client: GatewayClient,
        reconnect_delay: Duration,
        handle: Handle,
    ) -> (Self, UnboundedReceiver<Update>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = SseTransport::new(client.clone(), reconnect_delay);
        let session = Self {
            client,
            transport,
            handle,
            tx,
            chat: EventChannel::new(ChannelKind::Chat),
            logs: EventChannel::new(ChannelKind::Logs),
        };
        (session, rx)
    }

    pub fn execute_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: Command) {
        tracing::trace!(?command, "Executing command");
        match command {
            Command::Connect(kind) => self.connect(kind),
            Command::LoadHistory => self.spawn(|client| async move {
                Update::History(client.history().await.map_err(|e| e.to_string()))
            }),
            Command::SendMessage { content, purpose } => self.spawn(move |client| async move {
                let result = client
                    .send_message(&content)
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string());
                Update::Sent { purpose, result }
            }),
            Command::ListMemory { path, generation } => self.spawn(move |client| async move {
                let result = client
                    .list_memory(&path)
                    .await
                    .map(|listing| listing.entries)
                    .map_err(|e| e.to_string());
                Update::MemoryListed {
                    path,
                    generation,
                    result,
                }
            }),
            Command::ReadMemory { path, generation } => self.spawn(move |client| async move {
                let result = client
                    .read_memory(&path)
                    .await
                    .map(|file| file.content)
                    .map_err(|e| e.to_string());
                Update::MemoryRead {
                    path,
                    generation,
                    result,
                }
            }),
            Command::SearchMemory {
                query,
                limit,
                generation,
            } => self.spawn(move |client| async move {
                let result = client
                    .search_memory(&query, limit)
                    .await
                    .map(|found| found.results)
                    .map_err(|e| e.to_string());
                Update::SearchCompleted { generation, result }
            }),
            Command::LoadJobs => self.spawn(|client| async move {
                let (summary, jobs) = futures::join!(client.job_summary(), client.jobs());
                let result = match (summary, jobs) {
                    (Ok(summary), Ok(list)) => Ok((summary, list.jobs)),
                    (Err(e), _) | (_, Err(e)) => Err(e.to_string()),
                };
                Update::JobsLoaded(result)
            }),
            Command::CancelJob { id } => self.spawn(move |client| async move {
                let result = client.cancel_job(&id).await.map_err(|e| e.to_string());
                Update::JobCancelled { id, result }
            }),
            Command::LoadExtensions => self.spawn(|client| async move {
                let (extensions, tools) =
                    futures::join!(client.extensions(), client.extension_tools());
                Update::ExtensionsLoaded {
                    extensions: extensions
                        .map(|list| list.extensions)
                        .unwrap_or_else(|e| {
                            tracing::warn!(error = %e, "Failed to load extensions");
                            Vec::new()
                        }),
                    tools: tools.map(|list| list.tools).unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "Failed to load extension tools");
                        Vec::new()
                    }),
                }
            }),
            Command::ExtensionAction { action, name } => self.spawn(move |client| async move {
                let result = match action {
                    ExtensionAction::Activate => client.activate_extension(&name).await,
                    ExtensionAction::Remove => client.remove_extension(&name).await,
                }
                .map_err(|e| e.to_string());
                Update::ExtensionActionDone {
                    action,
                    name,
                    result,
                }
            }),
        }
    }

    /// Filter an update before it reaches the dashboard.
    ///
    /// Channel updates from an older connection, or for a closed channel,
    /// are dropped. Everything else passes through.
    pub fn admit(&mut self, update: Update) -> Option<Update> {
        match &update {
            Update::Channel(channel_update) => {
                let channel = match channel_update.kind {
                    ChannelKind::Chat => &self.chat,
                    ChannelKind::Logs => &self.logs,
                };
                if channel.accept(channel_update) {
                    Some(update)
                } else {
                    tracing::trace!(
                        channel = channel_update.kind.as_str(),
                        generation = channel_update.generation,
                        "Dropped update from superseded connection"
                    );
                    None
                }
            }
            _ => Some(update),
        }
    }

    /// Close both channels. In-flight requests finish on their own and their
    /// updates are discarded once the receiver is dropped.
    pub fn shutdown(&mut self) {
        self.chat.close();
        self.logs.close();
        tracing::info!("Session shut down");
    }

    fn connect(&mut self, kind: ChannelKind) {
        let tx = self.tx.clone();
        let channel = match kind {
            ChannelKind::Chat => &mut self.chat,
            ChannelKind::Logs => &mut self.logs,
        };
        channel.connect(&self.handle, self.transport.clone(), move |update| {
            tx.send(Update::Channel(update)).is_ok()
        });
    }

    fn spawn<F, Fut>(&self, work: F)
    where
        F: FnOnce(GatewayClient) -> Fut,
        Fut: Future<Output = Update> + Send + 'static,
    {
        let tx = self.tx.clone();
        let future = work(self.client.clone());
        self.handle.spawn(async move {
            let update = future.await;
            if tx.send(update).is_err() {
                tracing::debug!("Update receiver gone, dropping result");
            }
        });
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.chat.close();
        self.logs.close();
    }
}
