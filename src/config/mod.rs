//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResolverConfig (validated)
//!     → ResolverOptions handed to PageResolver::configure
//!
//! On page change:
//!     reload watcher signals
//!     → loader.rs re-reads the page list
//!     → PageResolver::reload_pages
//! ```
//!
//! # Design Decisions
//! - Every option is optional; omitted ones keep their previous value
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, ResolverConfig, ResolverOptions, ResolverSettings, WatchConfig};
pub use validation::{validate_config, ValidationError};
