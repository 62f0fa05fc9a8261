use super::*;

impl App {
    // ========== Logs Tab ==========

    pub(super) fn handle_logs_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if self.log_target_editing {
            self.handle_log_target_key(key);
            return Vec::new();
        }
        match key.code {
            KeyCode::Char('p') | KeyCode::Char(' ') => self.dashboard.toggle_log_pause(),
            KeyCode::Char('c') => {
                self.dashboard.clear_logs();
                self.log_scroll = 0;
            }
            KeyCode::Char('l') => self.dashboard.cycle_log_level(),
            KeyCode::Char('/') => self.log_target_editing = true,
            KeyCode::Char('f') => {
                self.log_follow = !self.log_follow;
                if self.log_follow {
                    self.log_scroll = 0;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_logs(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_logs(-1),
            KeyCode::PageUp | KeyCode::Char('u') => self.scroll_logs(20),
            KeyCode::PageDown | KeyCode::Char('d') => self.scroll_logs(-20),
            KeyCode::End | KeyCode::Char('G') => {
                self.log_scroll = 0;
                self.log_follow = true;
            }
            _ => {}
        }
        Vec::new()
    }

    /// Keys while the target filter has focus. The filter applies as you type.
    fn handle_log_target_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.log_target_editing = false;
                return;
            }
            KeyCode::Backspace => {
                self.log_target_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.log_target_input.push(c);
            }
            _ => return,
        }
        self.log_scroll = 0;
        self.dashboard.set_log_target(&self.log_target_input);
    }

    /// Scroll towards older (`delta > 0`) or newer records.
    fn scroll_logs(&mut self, delta: isize) {
        let max = self.dashboard.logs().visible_count().saturating_sub(1);
        let next = (self.log_scroll as isize + delta).clamp(0, max as isize) as usize;
        self.log_scroll = next;
        self.log_follow = next == 0;
    }
}
