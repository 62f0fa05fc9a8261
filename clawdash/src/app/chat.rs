use super::*;

impl App {
    // ========== Chat Tab ==========

    /// Handle keyboard input in the chat tab. Printable keys go to the input.
    pub(super) fn handle_chat_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('y') if ctrl => self.answer_approval(ApprovalDecision::Approve),
            KeyCode::Char('a') if ctrl => self.answer_approval(ApprovalDecision::Always),
            KeyCode::Char('n') if ctrl => self.answer_approval(ApprovalDecision::Deny),
            KeyCode::Char('u') if ctrl => {
                self.chat_input.clear();
                Vec::new()
            }
            KeyCode::Char(c) if !ctrl => {
                self.chat_input.push(c);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
                Vec::new()
            }
            KeyCode::Enter => self.submit_chat_input(),
            KeyCode::Up => {
                self.chat_scroll = self.chat_scroll.saturating_add(1);
                Vec::new()
            }
            KeyCode::Down => {
                self.chat_scroll = self.chat_scroll.saturating_sub(1);
                Vec::new()
            }
            KeyCode::PageUp => {
                self.chat_scroll = self.chat_scroll.saturating_add(10);
                Vec::new()
            }
            KeyCode::PageDown => {
                self.chat_scroll = self.chat_scroll.saturating_sub(10);
                Vec::new()
            }
            KeyCode::End => {
                self.chat_scroll = 0;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Send the composed text. The input is kept if it was blank.
    fn submit_chat_input(&mut self) -> Vec<Command> {
        match self.dashboard.send_user_message(&self.chat_input) {
            Some(command) => {
                self.chat_input.clear();
                self.chat_scroll = 0;
                vec![command]
            }
            None => Vec::new(),
        }
    }

    fn answer_approval(&mut self, decision: ApprovalDecision) -> Vec<Command> {
        match self.dashboard.respond_to_approval(decision) {
            Some(command) => {
                tracing::info!(decision = decision.as_message(), "Answered approval request");
                vec![command]
            }
            None => Vec::new(),
        }
    }
}
