//! Host environment capability.
//!
//! # Data Flow
//! ```text
//! successful resolution
//!     → HostEnvironment::page_props(element id, data attribute)
//!         Browser  → ElementLookup reads the attribute
//!         Headless → None
//! ```
//!
//! # Design Decisions
//! - Chosen once when the resolver is built, never probed per call
//! - Missing element or attribute is a silent `None`

pub mod document;

use std::fmt;
use std::sync::Arc;

pub use document::StaticDocument;

/// Read access to attributes of elements identified by id.
pub trait ElementLookup: Send + Sync {
    fn attribute(&self, element_id: &str, attribute: &str) -> Option<String>;
}

/// Where the resolver runs.
#[derive(Clone, Default)]
pub enum HostEnvironment {
    /// A document is available for reading server-injected page props.
    Browser(Arc<dyn ElementLookup>),
    /// No document; hydration is a no-op.
    #[default]
    Headless,
}

impl HostEnvironment {
    pub fn browser(lookup: impl ElementLookup + 'static) -> Self {
        Self::Browser(Arc::new(lookup))
    }

    /// Raw page props injected by the server, if any.
    pub fn page_props(&self, element_id: &str, attribute: &str) -> Option<String> {
        match self {
            Self::Browser(lookup) => lookup.attribute(element_id, attribute),
            Self::Headless => None,
        }
    }
}

impl fmt::Debug for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browser(_) => f.write_str("Browser"),
            Self::Headless => f.write_str("Headless"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_has_no_props() {
        assert_eq!(HostEnvironment::Headless.page_props("app", "data-page"), None);
    }

    #[test]
    fn test_browser_reads_attribute() {
        let doc = StaticDocument::new().with_attribute("app", "data-page", r#"{"props":{}}"#);
        let host = HostEnvironment::browser(doc);
        assert_eq!(
            host.page_props("app", "data-page").as_deref(),
            Some(r#"{"props":{}}"#)
        );
        assert_eq!(host.page_props("app", "data-other"), None);
        assert_eq!(host.page_props("root", "data-page"), None);
        assert_eq!(format!("{host:?}"), "Browser");
    }
}
