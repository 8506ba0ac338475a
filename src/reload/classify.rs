//! Page file classification for watcher events.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind};

use crate::config::schema::WatchConfig;

/// A page file appeared or disappeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageChange {
    Added(PathBuf),
    Removed(PathBuf),
}

impl PageChange {
    pub fn path(&self) -> &Path {
        match self {
            PageChange::Added(path) | PageChange::Removed(path) => path,
        }
    }
}

/// Decides which paths count as page files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFileFilter {
    pages_folder: String,
    watch_extensions: Vec<String>,
}

impl PageFileFilter {
    pub fn new(pages_folder: impl Into<String>, watch_extensions: Vec<String>) -> Self {
        Self {
            pages_folder: pages_folder.into(),
            watch_extensions,
        }
    }

    pub fn from_config(config: &WatchConfig) -> Self {
        Self::new(config.pages_folder.clone(), config.watch_extensions.clone())
    }

    /// Below `/<pages folder>/` and ending in a watched extension.
    pub fn is_watched_page_file(&self, path: &Path) -> bool {
        let path = path.to_string_lossy().replace('\\', "/");
        path.contains(&format!("/{}/", self.pages_folder))
            && self.watch_extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }
}

/// Page changes carried by a watcher event. Modifications are ignored.
pub fn classify(event: &Event, filter: &PageFileFilter) -> Vec<PageChange> {
    let change: fn(PathBuf) -> PageChange = match event.kind {
        EventKind::Create(_) => PageChange::Added,
        EventKind::Remove(_) => PageChange::Removed,
        _ => return Vec::new(),
    };

    event
        .paths
        .iter()
        .filter(|path| filter.is_watched_page_file(path))
        .cloned()
        .map(change)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn filter() -> PageFileFilter {
        PageFileFilter::from_config(&WatchConfig::default())
    }

    #[test]
    fn test_watched_page_files() {
        let filter = filter();
        assert!(filter.is_watched_page_file(Path::new("/app/resources/js/pages/home.tsx")));
        assert!(filter.is_watched_page_file(Path::new("/app/domains/blog/pages/post.vue")));
        assert!(!filter.is_watched_page_file(Path::new("/app/resources/js/pages/home.ts")));
        assert!(!filter.is_watched_page_file(Path::new("/app/components/Button.tsx")));
        assert!(!filter.is_watched_page_file(Path::new("pages/home.tsx")));
    }

    #[test]
    fn test_classify_create_and_remove() {
        let filter = filter();

        let created = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/app/pages/new.tsx"))
            .add_path(PathBuf::from("/app/lib/util.tsx"));
        assert_eq!(
            classify(&created, &filter),
            vec![PageChange::Added(PathBuf::from("/app/pages/new.tsx"))]
        );

        let removed = Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("/app/pages/old.svelte"));
        let changes = classify(&removed, &filter);
        assert_eq!(changes, vec![PageChange::Removed(PathBuf::from("/app/pages/old.svelte"))]);
        assert_eq!(changes[0].path(), Path::new("/app/pages/old.svelte"));
    }

    #[test]
    fn test_classify_ignores_modifications() {
        let modified = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/app/pages/home.tsx"));
        assert!(classify(&modified, &filter()).is_empty());
    }
}
