//! Resolver error definitions.

use thiserror::Error;

/// Errors surfaced by [`PageResolver`](crate::resolver::PageResolver).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The domain pattern matched but did not yield a non-empty domain and page.
    #[error(
        "Invalid domain syntax: \"{input}\". Expected format: domain{delimiter}page path, \
         both domain and page parts must be non-empty"
    )]
    DomainSyntax { input: String, delimiter: String },

    /// An option supplied to `configure` was rejected.
    #[error("invalid {option}: {reason}")]
    Configuration { option: String, reason: String },

    /// None of the supplied names matched an entry in the mapping.
    #[error("Page not found: {}", .names.join(", "))]
    PageNotFound { names: Vec<String> },
}

impl ResolveError {
    pub(crate) fn configuration(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error signals malformed caller input rather than a missing page.
    pub fn is_domain_syntax(&self) -> bool {
        matches!(self, Self::DomainSyntax { .. })
    }
}

/// Failure reported by a page loader.
///
/// Cloneable so an eager loader can be awaited more than once.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
