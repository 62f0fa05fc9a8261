//! Lazily loaded workspace tree
//!
//! Nodes live in an arena keyed by path and refer to their children by path,
//! so a listing can be attached to its parent without walking the tree.
//! A directory's children are fetched on first expansion and cached after
//! that. Reloading the root throws away every node and bumps the tree
//! generation; listings requested under an older generation are ignored.

use std::collections::HashMap;

use crate::types::ListEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    /// Child paths, in listing order. Empty until loaded.
    pub children: Vec<String>,
    pub expanded: bool,
    pub loaded: bool,
    /// A child listing is in flight
    pub loading: bool,
}

impl TreeNode {
    fn from_entry(entry: ListEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path,
            is_dir: entry.is_dir,
            children: Vec::new(),
            expanded: false,
            loaded: false,
            loading: false,
        }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    Collapsed,
    /// Re-expanded from cached children
    Expanded,
    /// Children must be listed before the node can expand
    Fetch { path: String, generation: u64 },
    /// Unknown path, a file, or a fetch already in flight
    Ignored,
}

/// One visible line of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub is_dir: bool,
    pub expanded: bool,
    pub loading: bool,
}

#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: HashMap<String, TreeNode>,
    roots: Vec<String>,
    generation: u64,
    root_loading: bool,
    root_loaded: bool,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, path: &str) -> Option<&TreeNode> {
        self.nodes.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn is_root_loading(&self) -> bool {
        self.root_loading
    }

    /// The root listing has arrived at least once
    pub fn is_root_loaded(&self) -> bool {
        self.root_loaded
    }

    /// Start a root reload. Returns the generation the listing must carry.
    pub fn begin_root_load(&mut self) -> u64 {
        self.generation += 1;
        self.root_loading = true;
        self.generation
    }

    /// Replace the whole tree with a fresh root listing.
    ///
    /// Returns `false` if a newer reload has started since.
    pub fn apply_root(&mut self, generation: u64, entries: Vec<ListEntry>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.nodes.clear();
        self.roots = entries.iter().map(|entry| entry.path.clone()).collect();
        for entry in entries {
            self.nodes.insert(entry.path.clone(), TreeNode::from_entry(entry));
        }
        self.root_loading = false;
        self.root_loaded = true;
        true
    }

    /// The root listing failed. The previous tree, if any, stays.
    pub fn root_failed(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.root_loading = false;
        true
    }

    /// Expand or collapse a directory.
    pub fn toggle(&mut self, path: &str) -> Toggle {
        let generation = self.generation;
        let Some(node) = self.nodes.get_mut(path) else {
            return Toggle::Ignored;
        };
        if !node.is_dir {
            return Toggle::Ignored;
        }
        if node.expanded {
            node.expanded = false;
            return Toggle::Collapsed;
        }
        if node.loaded {
            node.expanded = true;
            return Toggle::Expanded;
        }
        if node.loading {
            return Toggle::Ignored;
        }
        node.loading = true;
        Toggle::Fetch {
            path: node.path.clone(),
            generation,
        }
    }

    /// Attach a child listing and expand its parent.
    ///
    /// Returns `false` for listings from before a root reload and for
    /// parents no longer in the tree.
    pub fn apply_children(&mut self, path: &str, generation: u64, entries: Vec<ListEntry>) -> bool {
        if generation != self.generation {
            return false;
        }
        if !self.nodes.contains_key(path) {
            return false;
        }
        let child_paths: Vec<String> = entries.iter().map(|entry| entry.path.clone()).collect();
        for entry in entries {
            self.nodes.insert(entry.path.clone(), TreeNode::from_entry(entry));
        }
        if let Some(node) = self.nodes.get_mut(path) {
            node.children = child_paths;
            node.loaded = true;
            node.expanded = true;
            node.loading = false;
        }
        true
    }

    /// A child listing failed; the node can be toggled again to retry.
    pub fn children_failed(&mut self, path: &str, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.nodes.get_mut(path) {
            Some(node) => {
                node.loading = false;
                true
            }
            None => false,
        }
    }

    /// Depth-first projection of the expanded part of the tree.
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for path in &self.roots {
            self.push_rows(path, 0, &mut rows);
        }
        rows
    }

    fn push_rows(&self, path: &str, depth: usize, rows: &mut Vec<TreeRow>) {
        let Some(node) = self.nodes.get(path) else {
            return;
        };
        rows.push(TreeRow {
            path: node.path.clone(),
            name: node.name.clone(),
            depth,
            is_dir: node.is_dir,
            expanded: node.expanded,
            loading: node.loading,
        });
        if node.expanded {
            for child in &node.children {
                // A listing that names its own parent would recurse forever.
                if child != path {
                    self.push_rows(child, depth + 1, rows);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(path: &str) -> ListEntry {
        ListEntry {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            is_dir: true,
        }
    }

    fn file(path: &str) -> ListEntry {
        ListEntry {
            is_dir: false,
            ..dir(path)
        }
    }

    fn loaded_tree() -> MemoryTree {
        let mut tree = MemoryTree::new();
        let generation = tree.begin_root_load();
        assert!(tree.apply_root(generation, vec![dir("notes"), file("README.md")]));
        tree
    }

    #[test]
    fn test_root_listing_populates_roots_in_order() {
        let tree = loaded_tree();
        let rows = tree.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "notes");
        assert!(rows[0].is_dir);
        assert_eq!(rows[1].path, "README.md");
        assert!(tree.is_root_loaded());
    }

    #[test]
    fn test_toggle_fetches_once_across_cycles() {
        let mut tree = loaded_tree();
        let mut fetches = 0;

        for _ in 0..4 {
            match tree.toggle("notes") {
                Toggle::Fetch { path, generation } => {
                    fetches += 1;
                    assert!(tree.apply_children(&path, generation, vec![file("notes/a.md")]));
                }
                Toggle::Expanded | Toggle::Collapsed => {}
                Toggle::Ignored => panic!("directory toggle ignored"),
            }
        }

        assert_eq!(fetches, 1);
    }

    #[test]
    fn test_toggle_while_loading_does_not_refetch() {
        let mut tree = loaded_tree();
        assert!(matches!(tree.toggle("notes"), Toggle::Fetch { .. }));
        assert_eq!(tree.toggle("notes"), Toggle::Ignored);
        assert!(tree.node("notes").unwrap().loading);
    }

    #[test]
    fn test_collapse_keeps_cached_children() {
        let mut tree = loaded_tree();
        let Toggle::Fetch { path, generation } = tree.toggle("notes") else {
            panic!("expected fetch");
        };
        tree.apply_children(&path, generation, vec![dir("notes/daily"), file("notes/a.md")]);
        assert_eq!(tree.rows().len(), 4);
        assert_eq!(tree.rows()[1].depth, 1);

        assert_eq!(tree.toggle("notes"), Toggle::Collapsed);
        assert_eq!(tree.rows().len(), 2);
        assert_eq!(tree.node("notes").unwrap().children.len(), 2);

        assert_eq!(tree.toggle("notes"), Toggle::Expanded);
        assert_eq!(tree.rows().len(), 4);
    }

    #[test]
    fn test_files_do_not_toggle() {
        let mut tree = loaded_tree();
        assert_eq!(tree.toggle("README.md"), Toggle::Ignored);
        assert_eq!(tree.toggle("missing"), Toggle::Ignored);
    }

    #[test]
    fn test_root_reload_resets_state_and_allows_refetch() {
        let mut tree = loaded_tree();
        let Toggle::Fetch { path, generation } = tree.toggle("notes") else {
            panic!("expected fetch");
        };
        tree.apply_children(&path, generation, vec![file("notes/a.md")]);

        let generation = tree.begin_root_load();
        tree.apply_root(generation, vec![dir("notes")]);
        let node = tree.node("notes").unwrap();
        assert!(!node.expanded);
        assert!(!node.loaded);
        assert!(tree.node("notes/a.md").is_none());
        assert!(matches!(tree.toggle("notes"), Toggle::Fetch { .. }));
    }

    #[test]
    fn test_listing_from_before_reload_is_dropped() {
        let mut tree = loaded_tree();
        let Toggle::Fetch { path, generation } = tree.toggle("notes") else {
            panic!("expected fetch");
        };
        let reload = tree.begin_root_load();
        tree.apply_root(reload, vec![dir("notes")]);

        assert!(!tree.apply_children(&path, generation, vec![file("notes/a.md")]));
        assert!(!tree.node("notes").unwrap().expanded);
    }

    #[test]
    fn test_superseded_root_listing_is_dropped() {
        let mut tree = MemoryTree::new();
        let first = tree.begin_root_load();
        let second = tree.begin_root_load();
        assert!(tree.apply_root(second, vec![dir("new")]));
        assert!(!tree.apply_root(first, vec![dir("old")]));
        assert!(tree.node("old").is_none());
    }

    #[test]
    fn test_failed_listing_allows_retry() {
        let mut tree = loaded_tree();
        let Toggle::Fetch { path, generation } = tree.toggle("notes") else {
            panic!("expected fetch");
        };
        assert!(tree.children_failed(&path, generation));
        assert!(matches!(tree.toggle("notes"), Toggle::Fetch { .. }));
    }
}
