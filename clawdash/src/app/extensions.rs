use super::*;

impl App {
    // ========== Extensions Tab ==========

    pub(super) fn handle_extensions_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let len = self.dashboard.extensions().extensions().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                step_selection(&mut self.extensions_state, len, 1)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                step_selection(&mut self.extensions_state, len, -1)
            }
            KeyCode::Char('r') => return vec![self.dashboard.refresh_extensions()],
            KeyCode::Char('a') => return self.act_on_selected(ExtensionAction::Activate),
            KeyCode::Char('d') => return self.act_on_selected(ExtensionAction::Remove),
            _ => {}
        }
        Vec::new()
    }

    fn act_on_selected(&mut self, action: ExtensionAction) -> Vec<Command> {
        let Some(extension) = self
            .extensions_state
            .selected()
            .and_then(|idx| self.dashboard.extensions().extensions().get(idx))
        else {
            return Vec::new();
        };
        tracing::info!(extension = %extension.name, action = action.label(), "Extension action");
        vec![self.dashboard.extension_action(action, &extension.name)]
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app, key};
    use super::*;
    use clawdash_core::{ExtensionInfo, Update};

    #[test]
    fn test_activate_and_remove_selected_extension() {
        let mut app = app();
        app.switch_tab(Tab::Extensions);
        app.dashboard.apply(Update::ExtensionsLoaded {
            extensions: vec![ExtensionInfo {
                name: "github".to_string(),
                kind: "mcp".to_string(),
                description: None,
                authenticated: true,
                active: false,
                tools: Vec::new(),
            }],
            tools: Vec::new(),
        });

        // Nothing selected yet.
        assert!(app.handle_key(key(KeyCode::Char('a'))).is_empty());

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(
            app.handle_key(key(KeyCode::Char('a'))),
            vec![Command::ExtensionAction {
                action: ExtensionAction::Activate,
                name: "github".to_string(),
            }]
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Char('d'))),
            vec![Command::ExtensionAction {
                action: ExtensionAction::Remove,
                name: "github".to_string(),
            }]
        );
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), vec![Command::LoadExtensions]);
    }
}
