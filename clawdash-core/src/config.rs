//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/clawdash/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/clawdash/` (~/.config/clawdash/)
//! - State/Logs: `$XDG_STATE_HOME/clawdash/` (~/.local/state/clawdash/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted for the bearer token.
pub const TOKEN_ENV: &str = "CLAWDASH_TOKEN";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Gateway connection settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Log viewer settings
    #[serde(default)]
    pub logs: LogsConfig,

    /// Memory browser settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the gateway lives and how to talk to it
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway (e.g., `http://127.0.0.1:3000`)
    #[serde(default = "default_gateway_url")]
    pub url: String,

    /// Bearer token (can also use `CLAWDASH_TOKEN` or `--token`)
    pub token: Option<String>,

    /// HTTP request timeout in seconds (REST calls only; push channels never time out)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Delay before the push transport reopens a dropped connection
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_gateway_url(),
            token: None,
            timeout_secs: default_timeout(),
            reconnect_delay_ms: default_reconnect_delay(),
        }
    }
}

impl GatewayConfig {
    /// Reconnect delay as a `Duration`
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_reconnect_delay() -> u64 {
    3000
}

/// Log viewer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LogsConfig {
    /// Maximum records retained in the ring buffer
    #[serde(default = "default_log_capacity")]
    pub capacity: usize,

    /// Optional cap on records held while paused (unbounded when unset)
    #[serde(default)]
    pub pause_buffer_limit: Option<usize>,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            capacity: default_log_capacity(),
            pause_buffer_limit: None,
        }
    }
}

fn default_log_capacity() -> usize {
    2000
}

/// Memory browser configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MemoryConfig {
    /// Quiet period before a typed query is sent
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,

    /// Maximum hits requested per search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Characters of hit content shown as the snippet
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce(),
            search_limit: default_search_limit(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl MemoryConfig {
    /// Debounce window as a `Duration`
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn default_search_debounce() -> u64 {
    300
}

fn default_search_limit() -> usize {
    20
}

fn default_snippet_chars() -> usize {
    120
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        let url = self.gateway.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "gateway.url must be an http(s) URL, got {:?}",
                self.gateway.url
            )));
        }
        if self.logs.capacity == 0 {
            return Err(Error::Config("logs.capacity must be at least 1".to_string()));
        }
        if self.logs.pause_buffer_limit == Some(0) {
            return Err(Error::Config(
                "logs.pause_buffer_limit must be at least 1 when set".to_string(),
            ));
        }
        if self.memory.search_limit == 0 {
            return Err(Error::Config("memory.search_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Resolve the bearer token: explicit flag, then environment, then config file.
    ///
    /// Blank values are treated as absent.
    pub fn resolve_token(&self, flag: Option<&str>) -> Option<String> {
        let env = std::env::var(TOKEN_ENV).ok();
        [flag.map(str::to_string), env, self.gateway.token.clone()]
            .into_iter()
            .flatten()
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/clawdash/config.toml` (~/.config/clawdash/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("clawdash").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/clawdash/` (~/.local/state/clawdash/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("clawdash")
    }
}
