//! HTTP client for the gateway REST API

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::events::ChannelKind;
use crate::types::{
    ActionResponse, ExtensionListResponse, HistoryResponse, JobListResponse, JobSummaryResponse,
    MemoryListResponse, MemoryReadResponse, MemorySearchRequest, MemorySearchResponse,
    SendMessageRequest, SendMessageResponse, ThreadListResponse, ToolListResponse,
};

/// HTTP client for the gateway API
#[derive(Clone)]
pub struct GatewayClient {
    /// Client for REST calls (with request timeout)
    http_client: reqwest::Client,
    /// Client for push channels (no overall timeout; streams are long-lived)
    stream_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GatewayClient {
    /// Create a new client for `config.url` authenticating with `token`.
    ///
    /// Returns an error if the token cannot be used as a header value.
    pub fn new(config: &GatewayConfig, token: &str) -> Result<Self> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| Error::Config(format!("invalid token: {}", e)))?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers.clone())
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        let stream_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            stream_client,
            base_url,
            token: token.to_string(),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a push channel, with the token in the query string.
    pub fn events_url(&self, kind: ChannelKind) -> String {
        format!(
            "{}{}?token={}",
            self.base_url,
            kind.path(),
            urlencoding::encode(&self.token)
        )
    }

    /// Client configured for event streams
    pub(crate) fn stream_client(&self) -> &reqwest::Client {
        &self.stream_client
    }

    // ========== Chat ==========

    /// List chat threads. Doubles as the token check.
    pub async fn threads(&self) -> Result<ThreadListResponse> {
        self.get_json("/api/chat/threads").await
    }

    /// History of the active thread
    pub async fn history(&self) -> Result<HistoryResponse> {
        self.get_json("/api/chat/history").await
    }

    /// Send a chat turn (user input or approval answer)
    pub async fn send_message(&self, content: &str) -> Result<SendMessageResponse> {
        let body = SendMessageRequest {
            content,
            thread_id: None,
        };
        self.post_json("/api/chat/send", &body).await
    }

    // ========== Memory ==========

    /// List one directory level. An empty path lists the root.
    pub async fn list_memory(&self, path: &str) -> Result<MemoryListResponse> {
        self.get_json(&format!("/api/memory/list?path={}", urlencoding::encode(path)))
            .await
    }

    /// Read a file's content
    pub async fn read_memory(&self, path: &str) -> Result<MemoryReadResponse> {
        self.get_json(&format!("/api/memory/read?path={}", urlencoding::encode(path)))
            .await
    }

    /// Full-text search over the workspace
    pub async fn search_memory(&self, query: &str, limit: usize) -> Result<MemorySearchResponse> {
        let body = MemorySearchRequest { query, limit };
        self.post_json("/api/memory/search", &body).await
    }

    // ========== Jobs ==========

    pub async fn jobs(&self) -> Result<JobListResponse> {
        self.get_json("/api/jobs").await
    }

    pub async fn job_summary(&self) -> Result<JobSummaryResponse> {
        self.get_json("/api/jobs/summary").await
    }

    /// Cancel a pending or running job
    pub async fn cancel_job(&self, job_id: &str) -> Result<()> {
        let path = format!("/api/jobs/{}/cancel", urlencoding::encode(job_id));
        let _: serde_json::Value = self.post_empty(&path).await?;
        Ok(())
    }

    // ========== Extensions ==========

    pub async fn extensions(&self) -> Result<ExtensionListResponse> {
        self.get_json("/api/extensions").await
    }

    pub async fn extension_tools(&self) -> Result<ToolListResponse> {
        self.get_json("/api/extensions/tools").await
    }

    pub async fn activate_extension(&self, name: &str) -> Result<ActionResponse> {
        self.post_empty(&format!(
            "/api/extensions/{}/activate",
            urlencoding::encode(name)
        ))
        .await
    }

    pub async fn remove_extension(&self, name: &str) -> Result<ActionResponse> {
        self.post_empty(&format!(
            "/api/extensions/{}/remove",
            urlencoding::encode(name)
        ))
        .await
    }

    // ========== Plumbing ==========

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.get(&url).send().await?;
        Self::parse_response(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.post(&url).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.post(&url).send().await?;
        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            tracing::debug!(status = %status, body = %error_text, "Gateway returned an error");
            Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            })
        }
    }
}
