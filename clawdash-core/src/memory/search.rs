//! Debounced search over the memory workspace

use std::time::{Duration, Instant};

use crate::types::SearchHit;

/// Last-write-wins debounce.
///
/// Scheduling replaces whatever was pending and restarts the window; only a
/// value that survives a full quiet window is released by [`Debouncer::poll`].
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.window, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Release the pending value once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.cancel(),
            _ => None,
        }
    }
}

/// A search hit trimmed for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub path: String,
    pub snippet: String,
}

impl SearchResult {
    /// Keep the first `snippet_chars` characters of the hit content.
    pub fn from_hit(hit: SearchHit, snippet_chars: usize) -> Self {
        Self {
            path: hit.path,
            snippet: hit.content.chars().take(snippet_chars).collect(),
        }
    }
}

/// What the memory panel shows in place of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MemoryView {
    #[default]
    Tree,
    Searching {
        query: String,
    },
    Results {
        query: String,
        results: Vec<SearchResult>,
    },
    Failed {
        query: String,
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_only_last_call_in_window_fires() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        let mut fired = Vec::new();

        for (offset, query) in [(0, "a"), (100, "ab"), (250, "abc")] {
            let now = t0 + ms(offset);
            fired.extend(debouncer.poll(now));
            debouncer.schedule(query, now);
        }
        // Quiet until 300ms after the last call.
        for offset in [300, 400, 549] {
            fired.extend(debouncer.poll(t0 + ms(offset)));
        }
        assert!(fired.is_empty());

        fired.extend(debouncer.poll(t0 + ms(550)));
        fired.extend(debouncer.poll(t0 + ms(2000)));
        assert_eq!(fired, vec!["abc"]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule("q", t0);
        assert_eq!(debouncer.deadline(), Some(t0 + ms(300)));
        assert_eq!(debouncer.cancel(), Some("q"));
        assert_eq!(debouncer.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn test_snippet_counts_characters() {
        let hit = SearchHit {
            path: "notes/a.md".to_string(),
            content: "é".repeat(200),
            score: 1.0,
        };
        let result = SearchResult::from_hit(hit, 120);
        assert_eq!(result.snippet.chars().count(), 120);
        assert_eq!(result.path, "notes/a.md");
    }
}
