//! Page path resolver.
//!
//! Resolves logical page names such as `blog.show` or `[admin]::users.index`
//! to entries of a pre-built mapping of page file paths to loaders, then
//! loads the matching page.

pub mod config;
pub mod error;
pub mod host;
pub mod observability;
pub mod reload;
pub mod resolver;

pub use config::{ResolverConfig, ResolverOptions};
pub use error::{LoadError, ResolveError};
pub use host::{ElementLookup, HostEnvironment};
pub use resolver::{resolve_page_component, PageLoader, PageMapping, PageNames, PageResolver};
