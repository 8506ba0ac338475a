//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver and watcher produce:
//!     → tracing events (structured fields, gated by debug_logging in the resolver)
//!     → metrics.rs (resolution outcomes, cache rebuilds)
//!
//! The binary installs the subscriber (logging.rs); library code only emits.
//! ```
//!
//! # Design Decisions
//! - Counters go through the `metrics` facade and cost nothing without a recorder
//! - Log level comes from RUST_LOG, falling back to the configured level

pub mod logging;
pub mod metrics;
