//! Bounded log store with pause support
//!
//! Records live in a FIFO ring of fixed capacity; the oldest record is
//! evicted once the ring is full. While paused, arrivals are parked in a side
//! buffer and replayed in arrival order on resume. Each retained record
//! carries a visibility bit computed from the current [`LogFilter`].

use std::collections::VecDeque;

use crate::types::LogRecord;

use super::filter::LogFilter;

/// Ring capacity used when no configuration is given.
pub const DEFAULT_CAPACITY: usize = 2000;

/// A retained record and whether the current filter shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub record: LogRecord,
    pub visible: bool,
}

/// Log ring buffer, pause side buffer and filter state.
#[derive(Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    paused: bool,
    pending: VecDeque<LogRecord>,
    /// Cap on `pending`; `None` keeps every record received while paused
    pending_limit: Option<usize>,
    filter: LogFilter,
    evicted: u64,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, None)
    }
}

impl LogBuffer {
    pub fn new(capacity: usize, pending_limit: Option<usize>) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            paused: false,
            pending: VecDeque::new(),
            pending_limit: pending_limit.map(|limit| limit.max(1)),
            filter: LogFilter::default(),
            evicted: 0,
        }
    }

    /// Accept one record from the log channel.
    pub fn ingest(&mut self, record: LogRecord) {
        if self.paused {
            self.pending.push_back(record);
            if let Some(limit) = self.pending_limit {
                while self.pending.len() > limit {
                    self.pending.pop_front();
                    self.evicted += 1;
                }
            }
            return;
        }
        self.append(record);
    }

    /// Pause or resume. Resuming replays everything parked while paused.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if !paused {
            let parked = std::mem::take(&mut self.pending);
            tracing::debug!(count = parked.len(), "Replaying logs received while paused");
            for record in parked {
                self.append(record);
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Replace the filter and recompute visibility of every retained record.
    pub fn set_filter(&mut self, filter: LogFilter) {
        for entry in &mut self.entries {
            entry.visible = filter.matches(&entry.record);
        }
        self.filter = filter;
    }

    /// Drop all records, retained and parked, whether paused or not.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending.clear();
    }

    pub fn filter(&self) -> &LogFilter {
        &self.filter
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained records, oldest first
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Records the current filter shows, oldest first
    pub fn visible(&self) -> impl DoubleEndedIterator<Item = &LogRecord> {
        self.entries
            .iter()
            .filter(|entry| entry.visible)
            .map(|entry| &entry.record)
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.visible).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records waiting for resume
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total records dropped by either bound since start
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    fn append(&mut self, record: LogRecord) {
        let visible = self.filter.matches(&record);
        self.entries.push_back(LogEntry { record, visible });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
    }
}
