//! In-memory element lookup.

use std::collections::HashMap;

use super::ElementLookup;

/// Element attributes keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    elements: HashMap<String, HashMap<String, String>>,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(
        mut self,
        element_id: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_attribute(element_id, attribute, value);
        self
    }

    pub fn set_attribute(
        &mut self,
        element_id: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.elements
            .entry(element_id.into())
            .or_default()
            .insert(attribute.into(), value.into());
    }
}

impl ElementLookup for StaticDocument {
    fn attribute(&self, element_id: &str, attribute: &str) -> Option<String> {
        self.elements
            .get(element_id)
            .and_then(|attrs| attrs.get(attribute))
            .cloned()
    }
}
