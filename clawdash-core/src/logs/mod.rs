//! Live gateway logs
//!
//! [`LogBuffer`] keeps a bounded window of records from the log channel and
//! [`LogFilter`] decides which of them are shown. Filtering never changes
//! which records are retained.

mod buffer;
mod filter;

pub use buffer::{LogBuffer, LogEntry, DEFAULT_CAPACITY};
pub use filter::{LevelFilter, LogFilter};
