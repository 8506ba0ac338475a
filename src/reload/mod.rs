//! Hot reload subsystem.
//!
//! # Data Flow
//! ```text
//! filesystem events (notify)
//!     → classify.rs (page files only; create → Added, remove → Removed)
//!     → watcher.rs (logs, forwards PageChange)
//!     → debounce.rs (batches bursts)
//!     → caller re-reads the page list and calls PageResolver::reload_pages
//! ```
//!
//! # Design Decisions
//! - The watcher never builds a mapping itself; it only signals invalidation
//! - Edits to existing pages are ignored, only additions and removals matter

pub mod classify;
pub mod debounce;
pub mod watcher;

pub use classify::{classify, PageChange, PageFileFilter};
pub use debounce::{debounce, DEFAULT_DEBOUNCE};
pub use watcher::PageWatcher;
