//! Extensions panel state

use crate::command::{Command, ExtensionAction};
use crate::types::{ActionResponse, ExtensionInfo, ToolInfo};

#[derive(Debug, Default)]
pub struct ExtensionsPanel {
    extensions: Vec<ExtensionInfo>,
    tools: Vec<ToolInfo>,
    loaded: bool,
}

impl ExtensionsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extensions(&self) -> &[ExtensionInfo] {
        &self.extensions
    }

    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn refresh(&self) -> Command {
        Command::LoadExtensions
    }

    pub fn request(&self, action: ExtensionAction, name: &str) -> Command {
        Command::ExtensionAction {
            action,
            name: name.to_string(),
        }
    }

    pub fn apply_loaded(&mut self, extensions: Vec<ExtensionInfo>, tools: Vec<ToolInfo>) {
        self.extensions = extensions;
        self.tools = tools;
        self.loaded = true;
    }
}

/// Message to surface for an activate/remove outcome, if it failed.
pub fn action_failure(
    action: ExtensionAction,
    result: &Result<ActionResponse, String>,
) -> Option<String> {
    match result {
        Ok(response) if response.success => None,
        Ok(response) => Some(format!("{} failed: {}", action.label(), response.message)),
        Err(error) => Some(format!("{} failed: {}", action.label(), error)),
    }
}
