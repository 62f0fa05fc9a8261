//! # clawdash-core
//!
//! Client runtime for an operator dashboard attached to an agent gateway.
//!
//! This library provides:
//! - Two server-push event channels (chat and logs) with automatic reconnect
//! - The chat transcript with its approval gate and status line
//! - A bounded log buffer with pause and level/target filters
//! - A lazily loaded memory tree with debounced search
//! - Jobs and extensions panel state
//! - The REST client, configuration and logging infrastructure
//!
//! ## Architecture
//!
//! State and effects are kept apart:
//! - **[`Dashboard`]** owns all state. User actions and async completions
//!   mutate it on one thread and yield [`Command`]s.
//! - **[`Session`]** executes commands on a tokio runtime and reports each
//!   outcome as an [`Update`] on an unbounded channel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use clawdash_core::{Config, Dashboard, GatewayClient, Session};
//!
//! let config = Config::load().expect("failed to load config");
//! let token = config.resolve_token(None).expect("no token configured");
//! let client = GatewayClient::new(&config.gateway, &token).expect("bad gateway config");
//!
//! let runtime = tokio::runtime::Runtime::new().expect("failed to start runtime");
//! let (mut session, mut updates) =
//!     Session::new(client, config.gateway.reconnect_delay(), runtime.handle().clone());
//!
//! let mut dashboard = Dashboard::new(&config);
//! session.execute_all(dashboard.start());
//! while let Some(update) = updates.blocking_recv() {
//!     if let Some(update) = session.admit(update) {
//!         let commands = dashboard.apply(update);
//!         session.execute_all(commands);
//!     }
//! }
//! ```

// Re-export commonly used items at the crate root
pub use api::GatewayClient;
pub use channel::{ConnectionState, EventChannel};
pub use command::{Command, ExtensionAction, SendPurpose, Update};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use events::{ChannelKind, ChatEvent, ServerEvent};
pub use runtime::Session;
pub use types::*;

// Public modules
pub mod api;
pub mod channel;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod extensions;
pub mod jobs;
pub mod logging;
pub mod logs;
pub mod memory;
pub mod runtime;
pub mod sse;
pub mod transcript;
pub mod types;
