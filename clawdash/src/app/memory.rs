use clawdash_core::memory::MemoryView;

use super::*;

/// What a memory-tab row points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTarget {
    pub path: String,
    pub is_dir: bool,
}

impl App {
    // ========== Memory Tab ==========

    pub(super) fn handle_memory_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if self.memory_search_editing {
            return self.handle_memory_search_key(key);
        }
        match key.code {
            KeyCode::Char('/') => {
                self.memory_search_editing = true;
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.step_memory_selection(1);
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.step_memory_selection(-1);
                Vec::new()
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.memory_selected = 0;
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Char('l') => self.activate_memory_row(),
            KeyCode::Char('r') => {
                self.memory_selected = 0;
                vec![self.dashboard.reload_memory()]
            }
            KeyCode::PageDown | KeyCode::Char('d') => {
                self.viewer_scroll = self.viewer_scroll.saturating_add(10);
                Vec::new()
            }
            KeyCode::PageUp | KeyCode::Char('u') => {
                self.viewer_scroll = self.viewer_scroll.saturating_sub(10);
                Vec::new()
            }
            KeyCode::Esc => {
                if self.dashboard.memory().file().is_some() {
                    self.dashboard.close_file();
                    Vec::new()
                } else if !self.dashboard.memory().query().is_empty() {
                    self.memory_selected = 0;
                    self.dashboard
                        .set_search_query("", Instant::now())
                        .into_iter()
                        .collect()
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Keys while the search box has focus. Every edit reschedules the search.
    fn handle_memory_search_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let mut query = self.dashboard.memory().query().to_string();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.memory_search_editing = false;
                return Vec::new();
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                query.push(c);
            }
            _ => return Vec::new(),
        }
        self.memory_selected = 0;
        self.dashboard
            .set_search_query(&query, Instant::now())
            .into_iter()
            .collect()
    }

    /// Rows the memory list currently shows, in display order.
    pub fn memory_targets(&self) -> Vec<MemoryTarget> {
        match self.dashboard.memory().view() {
            MemoryView::Results { results, .. } => results
                .iter()
                .map(|result| MemoryTarget {
                    path: result.path.clone(),
                    is_dir: false,
                })
                .collect(),
            MemoryView::Searching { .. } | MemoryView::Failed { .. } => Vec::new(),
            MemoryView::Tree => self
                .dashboard
                .memory()
                .tree()
                .rows()
                .into_iter()
                .map(|row| MemoryTarget {
                    path: row.path,
                    is_dir: row.is_dir,
                })
                .collect(),
        }
    }

    fn step_memory_selection(&mut self, delta: isize) {
        let len = self.memory_targets().len();
        if len == 0 {
            self.memory_selected = 0;
            return;
        }
        let next = (self.memory_selected as isize + delta).clamp(0, len as isize - 1);
        self.memory_selected = next as usize;
    }

    /// Directories toggle; files open in the viewer.
    fn activate_memory_row(&mut self) -> Vec<Command> {
        let Some(target) = self.memory_targets().into_iter().nth(self.memory_selected) else {
            return Vec::new();
        };
        if target.is_dir {
            self.dashboard.toggle_node(&target.path).into_iter().collect()
        } else {
            self.viewer_scroll = 0;
            vec![self.dashboard.open_file(&target.path)]
        }
    }
}
