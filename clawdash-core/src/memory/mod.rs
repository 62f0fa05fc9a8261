//! Memory workspace browser
//!
//! [`MemoryPanel`] ties together the lazily loaded [`MemoryTree`], the
//! debounced search overlay and the file viewer. Methods that need the
//! network return a [`Command`]; the matching [`Update`] is fed back through
//! [`MemoryPanel::apply`]. Results for superseded requests are dropped.

mod search;
mod tree;
mod viewer;

pub use search::{Debouncer, MemoryView, SearchResult};
pub use tree::{MemoryTree, Toggle, TreeNode, TreeRow};
pub use viewer::{breadcrumb, Crumb, FileContent, FileView};

use std::time::Instant;

use crate::command::{Command, Update};
use crate::config::MemoryConfig;
use crate::types::{ListEntry, SearchHit};

#[derive(Debug)]
pub struct MemoryPanel {
    tree: MemoryTree,
    view: MemoryView,
    query: String,
    debouncer: Debouncer<String>,
    search_generation: u64,
    search_limit: usize,
    snippet_chars: usize,
    file: Option<FileView>,
    read_generation: u64,
}

impl Default for MemoryPanel {
    fn default() -> Self {
        Self::new(&MemoryConfig::default())
    }
}

impl MemoryPanel {
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            tree: MemoryTree::new(),
            view: MemoryView::Tree,
            query: String::new(),
            debouncer: Debouncer::new(config.search_debounce()),
            search_generation: 0,
            search_limit: config.search_limit,
            snippet_chars: config.snippet_chars,
            file: None,
            read_generation: 0,
        }
    }

    pub fn tree(&self) -> &MemoryTree {
        &self.tree
    }

    pub fn view(&self) -> &MemoryView {
        &self.view
    }

    /// Raw search input as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn file(&self) -> Option<&FileView> {
        self.file.as_ref()
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the scheduled search will fire, if one is pending
    pub fn search_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Refetch the root listing, discarding all tree state and any search.
    pub fn load_root(&mut self) -> Command {
        let generation = self.tree.begin_root_load();
        self.view = MemoryView::Tree;
        Command::ListMemory {
            path: String::new(),
            generation,
        }
    }

    /// Expand or collapse a directory, fetching its children the first time.
    pub fn toggle(&mut self, path: &str) -> Option<Command> {
        match self.tree.toggle(path) {
            Toggle::Fetch { path, generation } => Some(Command::ListMemory { path, generation }),
            Toggle::Collapsed | Toggle::Expanded | Toggle::Ignored => None,
        }
    }

    /// Record new search input.
    ///
    /// A blank query cancels any scheduled search and reloads the root right
    /// away. Anything else is scheduled and fires from [`MemoryPanel::tick`]
    /// once the input has been quiet for the debounce window.
    pub fn set_query(&mut self, query: &str, now: Instant) -> Option<Command> {
        self.query = query.to_string();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.debouncer.cancel();
            // Any in-flight search is now stale.
            self.search_generation += 1;
            return Some(self.load_root());
        }
        self.debouncer.schedule(trimmed.to_string(), now);
        None
    }

    /// Fire the debounced search if its window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Command> {
        let query = self.debouncer.poll(now)?;
        self.search_generation += 1;
        tracing::debug!(query = %query, generation = self.search_generation, "Searching memory");
        self.view = MemoryView::Searching {
            query: query.clone(),
        };
        Some(Command::SearchMemory {
            query,
            limit: self.search_limit,
            generation: self.search_generation,
        })
    }

    /// Open a file in the viewer.
    pub fn open(&mut self, path: &str) -> Command {
        self.read_generation += 1;
        self.file = Some(FileView::loading(path, self.read_generation));
        Command::ReadMemory {
            path: path.to_string(),
            generation: self.read_generation,
        }
    }

    pub fn close_file(&mut self) {
        self.file = None;
    }

    /// Apply a memory-related update. Returns `false` if it was stale or
    /// not a memory update.
    pub fn apply(&mut self, update: Update) -> bool {
        match update {
            Update::MemoryListed {
                path,
                generation,
                result,
            } => self.apply_listing(&path, generation, result),
            Update::MemoryRead {
                path,
                generation,
                result,
            } => self.apply_read(&path, generation, result),
            Update::SearchCompleted { generation, result } => {
                self.apply_search(generation, result)
            }
            _ => false,
        }
    }

    fn apply_listing(
        &mut self,
        path: &str,
        generation: u64,
        result: Result<Vec<ListEntry>, String>,
    ) -> bool {
        match (path.is_empty(), result) {
            (true, Ok(entries)) => self.tree.apply_root(generation, entries),
            (false, Ok(entries)) => self.tree.apply_children(path, generation, entries),
            (true, Err(error)) => {
                tracing::warn!(error = %error, "Failed to list memory root");
                self.tree.root_failed(generation)
            }
            (false, Err(error)) => {
                tracing::warn!(path, error = %error, "Failed to list memory directory");
                self.tree.children_failed(path, generation)
            }
        }
    }

    fn apply_read(&mut self, path: &str, generation: u64, result: Result<String, String>) -> bool {
        let Some(file) = self.file.as_mut() else {
            return false;
        };
        if file.generation != generation || file.path != path {
            return false;
        }
        file.content = match result {
            Ok(content) => FileContent::Loaded(content),
            Err(error) => FileContent::Failed(error),
        };
        true
    }

    fn apply_search(
        &mut self,
        generation: u64,
        result: Result<Vec<SearchHit>, String>,
    ) -> bool {
        if generation != self.search_generation {
            return false;
        }
        let query = match &self.view {
            MemoryView::Searching { query } => query.clone(),
            _ => return false,
        };
        let snippet_chars = self.snippet_chars;
        self.view = match result {
            Ok(hits) => MemoryView::Results {
                query,
                results: hits
                    .into_iter()
                    .map(|hit| SearchResult::from_hit(hit, snippet_chars))
                    .collect(),
            },
            Err(error) => {
                tracing::warn!(query = %query, error = %error, "Memory search failed");
                MemoryView::Failed { query, error }
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entry(path: &str, is_dir: bool) -> ListEntry {
        ListEntry {
            name: path.to_string(),
            path: path.to_string(),
            is_dir,
        }
    }

    fn hit(path: &str, content: &str) -> SearchHit {
        SearchHit {
            path: path.to_string(),
            content: content.to_string(),
            score: 0.5,
        }
    }

    fn panel_with_root() -> MemoryPanel {
        let mut panel = MemoryPanel::default();
        let Command::ListMemory { path, generation } = panel.load_root() else {
            panic!("expected root listing");
        };
        assert!(panel.apply(Update::MemoryListed {
            path,
            generation,
            result: Ok(vec![entry("notes", true), entry("a.md", false)]),
        }));
        panel
    }

    #[test]
    fn test_debounced_query_fires_single_search() {
        let mut panel = panel_with_root();
        let t0 = Instant::now();
        assert!(panel.set_query("r", t0).is_none());
        assert!(panel.set_query("ru", t0 + Duration::from_millis(100)).is_none());
        assert!(panel.set_query("rust ", t0 + Duration::from_millis(250)).is_none());
        assert!(panel.tick(t0 + Duration::from_millis(400)).is_none());

        let command = panel.tick(t0 + Duration::from_millis(550));
        let Some(Command::SearchMemory {
            query,
            limit,
            generation,
        }) = command
        else {
            panic!("expected search");
        };
        assert_eq!(query, "rust");
        assert_eq!(limit, 20);
        assert!(panel.tick(t0 + Duration::from_secs(5)).is_none());

        assert!(panel.apply(Update::SearchCompleted {
            generation,
            result: Ok(vec![hit("notes/r.md", "rust notes")]),
        }));
        assert_eq!(
            panel.view(),
            &MemoryView::Results {
                query: "rust".to_string(),
                results: vec![SearchResult {
                    path: "notes/r.md".to_string(),
                    snippet: "rust notes".to_string(),
                }],
            }
        );
        // Search results never touch the tree.
        assert_eq!(panel.tree().rows().len(), 2);
    }

    #[test]
    fn test_blank_query_reloads_root_immediately() {
        let mut panel = panel_with_root();
        let t0 = Instant::now();
        panel.set_query("x", t0);
        let command = panel.set_query("   ", t0 + Duration::from_millis(10));
        assert!(matches!(
            command,
            Some(Command::ListMemory { ref path, .. }) if path.is_empty()
        ));
        assert!(!panel.is_search_pending());
        assert!(panel.tick(t0 + Duration::from_secs(1)).is_none());
        assert_eq!(panel.view(), &MemoryView::Tree);
    }

    #[test]
    fn test_search_results_after_clear_are_dropped() {
        let mut panel = panel_with_root();
        let t0 = Instant::now();
        panel.set_query("x", t0);
        let Some(Command::SearchMemory { generation, .. }) =
            panel.tick(t0 + Duration::from_millis(300))
        else {
            panic!("expected search");
        };
        panel.set_query("", t0 + Duration::from_millis(310));

        assert!(!panel.apply(Update::SearchCompleted {
            generation,
            result: Ok(vec![hit("x.md", "x")]),
        }));
        assert_eq!(panel.view(), &MemoryView::Tree);
    }

    #[test]
    fn test_search_failure_is_shown_inline() {
        let mut panel = panel_with_root();
        let t0 = Instant::now();
        panel.set_query("x", t0);
        let Some(Command::SearchMemory { generation, .. }) =
            panel.tick(t0 + Duration::from_millis(300))
        else {
            panic!("expected search");
        };
        assert!(panel.apply(Update::SearchCompleted {
            generation,
            result: Err("500 Internal Server Error".to_string()),
        }));
        assert!(matches!(panel.view(), MemoryView::Failed { .. }));
    }

    #[test]
    fn test_toggle_routes_child_listing() {
        let mut panel = panel_with_root();
        let Some(Command::ListMemory { path, generation }) = panel.toggle("notes") else {
            panic!("expected child listing");
        };
        assert_eq!(path, "notes");
        assert!(panel.toggle("notes").is_none());
        assert!(panel.apply(Update::MemoryListed {
            path,
            generation,
            result: Ok(vec![entry("notes/b.md", false)]),
        }));
        assert_eq!(panel.tree().rows().len(), 3);
    }

    #[test]
    fn test_stale_file_read_is_dropped() {
        let mut panel = panel_with_root();
        let Command::ReadMemory {
            path: first,
            generation: first_gen,
        } = panel.open("a.md")
        else {
            panic!("expected read");
        };
        let Command::ReadMemory { path, generation } = panel.open("notes/b.md") else {
            panic!("expected read");
        };

        assert!(!panel.apply(Update::MemoryRead {
            path: first,
            generation: first_gen,
            result: Ok("old".to_string()),
        }));
        assert!(panel.apply(Update::MemoryRead {
            path,
            generation,
            result: Err("404 Not Found".to_string()),
        }));
        let file = panel.file().unwrap();
        assert_eq!(file.path, "notes/b.md");
        assert_eq!(file.body(), "Error: 404 Not Found");
    }
}
