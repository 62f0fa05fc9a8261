//! Open file state for the memory viewer

/// One clickable breadcrumb segment. The first is the workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub path: String,
}

/// `notes/daily/today.md` → `workspace / notes / daily / today.md`.
pub fn breadcrumb(path: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: "workspace".to_string(),
        path: String::new(),
    }];
    let mut current = String::new();
    for part in path.split('/').filter(|part| !part.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(part);
        crumbs.push(Crumb {
            label: part.to_string(),
            path: current.clone(),
        });
    }
    crumbs
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Loading,
    Loaded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileView {
    pub path: String,
    pub generation: u64,
    pub content: FileContent,
}

impl FileView {
    pub fn loading(path: &str, generation: u64) -> Self {
        Self {
            path: path.to_string(),
            generation,
            content: FileContent::Loading,
        }
    }

    pub fn breadcrumb(&self) -> Vec<Crumb> {
        breadcrumb(&self.path)
    }

    /// Text for the viewer body.
    pub fn body(&self) -> String {
        match &self.content {
            FileContent::Loading => "Loading...".to_string(),
            FileContent::Loaded(text) => text.clone(),
            FileContent::Failed(error) => format!("Error: {}", error),
        }
    }
}
