//! Server-sent-events transport
//!
//! Behaves like a browser `EventSource`: it holds one streaming GET open,
//! splits the body into named events, and when the stream fails or ends it
//! waits a fixed interval and opens a new one. The interval starts at the
//! configured reconnect delay and follows any `retry:` field the server sends.
//! There is no backoff and no terminal failure; callers only observe
//! `Opened` / `Dropped` transitions.

use std::time::Duration;

use eventsource_stream::Eventsource;
use futures::StreamExt;

use crate::api::GatewayClient;
use crate::error::{Error, Result};
use crate::events::ChannelKind;

/// What the transport reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportSignal {
    /// The server accepted the stream
    Opened,
    /// One raw event; `name` defaults to `message` when the server omits it
    Event { name: String, data: String },
    /// The connection failed or ended; a reconnect is scheduled
    Dropped { error: String },
}

/// Reconnecting event-stream reader for one channel endpoint.
#[derive(Clone)]
pub struct SseTransport {
    client: GatewayClient,
    reconnect_delay: Duration,
}

impl SseTransport {
    pub fn new(client: GatewayClient, reconnect_delay: Duration) -> Self {
        Self {
            client,
            reconnect_delay,
        }
    }

    /// Read `kind`'s stream forever, reconnecting on failure.
    ///
    /// `emit` returns `false` when its receiver is gone; the loop then exits.
    pub async fn run<F>(&self, kind: ChannelKind, mut emit: F)
    where
        F: FnMut(TransportSignal) -> bool,
    {
        let url = self.client.events_url(kind);
        let mut retry = self.reconnect_delay;
        let mut last_event_id = String::new();

        loop {
            let error = match self.open(&url, &last_event_id).await {
                Ok(response) => {
                    tracing::info!(channel = kind.as_str(), "Push channel open");
                    if !emit(TransportSignal::Opened) {
                        return;
                    }

                    let mut stream = response.bytes_stream().eventsource();
                    loop {
                        match stream.next().await {
                            Some(Ok(event)) => {
                                if let Some(delay) = event.retry {
                                    retry = delay;
                                }
                                if !event.id.is_empty() {
                                    last_event_id = event.id;
                                }
                                let name = if event.event.is_empty() {
                                    "message".to_string()
                                } else {
                                    event.event
                                };
                                let signal = TransportSignal::Event {
                                    name,
                                    data: event.data,
                                };
                                if !emit(signal) {
                                    return;
                                }
                            }
                            Some(Err(e)) => break e.to_string(),
                            None => break "stream closed by server".to_string(),
                        }
                    }
                }
                Err(e) => e.to_string(),
            };

            tracing::warn!(
                channel = kind.as_str(),
                error = %error,
                retry_ms = retry.as_millis() as u64,
                "Push channel dropped, reconnecting"
            );
            if !emit(TransportSignal::Dropped { error }) {
                return;
            }
            tokio::time::sleep(retry).await;
        }
    }

    async fn open(&self, url: &str, last_event_id: &str) -> Result<reqwest::Response> {
        let mut request = self.client.stream_client().get(url);
        if !last_event_id.is_empty() {
            request = request.header("Last-Event-ID", last_event_id);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(response)
    }
}
