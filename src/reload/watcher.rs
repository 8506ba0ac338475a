//! Page file watcher for hot reload.

use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::reload::classify::{classify, PageChange, PageFileFilter};

/// A watcher that reports page files being added or removed under a root.
pub struct PageWatcher {
    root: PathBuf,
    filter: PageFileFilter,
    change_tx: mpsc::UnboundedSender<PageChange>,
}

impl PageWatcher {
    /// Create a new PageWatcher.
    ///
    /// Returns the watcher and a receiver for page changes.
    pub fn new(root: &Path, filter: PageFileFilter) -> (Self, mpsc::UnboundedReceiver<PageChange>) {
        let (change_tx, change_rx) = mpsc::unbounded_channel();

        (
            Self {
                root: root.to_path_buf(),
                filter,
                change_tx,
            },
            change_rx,
        )
    }

    /// Start watching. Changes stop flowing when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.change_tx.clone();
        let filter = self.filter.clone();
        let root = self.root.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for change in classify(&event, &filter) {
                        let relative = change.path().strip_prefix(&root).unwrap_or(change.path());
                        match &change {
                            PageChange::Added(_) => {
                                tracing::info!(path = %relative.display(), "[HMR] New page added")
                            }
                            PageChange::Removed(_) => {
                                tracing::info!(path = %relative.display(), "[HMR] Page removed")
                            }
                        }
                        let _ = tx.send(change);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default(),
        )?;

        watcher.watch(&self.root, RecursiveMode::Recursive)?;

        tracing::info!(root = ?self.root, "Page watcher started");
        Ok(watcher)
    }
}
