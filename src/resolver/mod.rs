//! Page resolution subsystem.
//!
//! # Data Flow
//! ```text
//! configure(mapping, options)
//!     → pattern.rs (validate custom domain pattern)
//!     → detect.rs (domain mode, extensions)
//!     → engine.rs stores mapping + caches
//!
//! resolve(names)
//!     → pattern.rs (split "[domain]::page.path")
//!     → detect.rs (domain set, computed once)
//!     → path.rs (base path, candidate extensions)
//!     → mapping.rs (first present loader, awaited)
//!     → Return: page, or PageNotFound after all names
//! ```
//!
//! # Design Decisions
//! - The mapping is supplied wholesale; nothing is read from disk
//! - Deterministic: same mapping and name always yield the same candidates
//! - First match wins (names in order, then candidates in order)

pub mod detect;
pub mod engine;
pub mod mapping;
pub mod path;
pub mod pattern;

pub use engine::{resolve_page_component, PageNames, PageResolver, ResolverSummary};
pub use mapping::{LoadResult, LoaderFn, PageFuture, PageLoader, PageMapping};
pub use path::{PagePath, FALLBACK_EXTENSIONS};
pub use pattern::{DomainPattern, DEFAULT_DOMAIN_PATTERN};
