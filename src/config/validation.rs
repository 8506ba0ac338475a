//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check values the resolver would reject at `configure` time
//! - Check watcher settings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::ResolverConfig;
use crate::resolver::DomainPattern;

/// A single semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be a single folder name, got `{value}`")]
    NotAFolderName { field: &'static str, value: String },

    #[error("{0}")]
    DomainPattern(String),

    #[error("watch.debounce_ms must be greater than 0")]
    ZeroDebounce,

    #[error("watch extension `{0}` must start with `.`")]
    ExtensionWithoutDot(String),

    #[error("page `{0}` is listed more than once")]
    DuplicatePage(String),
}

pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let options = &config.resolver;

    if options.delimiter.as_deref() == Some("") {
        errors.push(ValidationError::Empty {
            field: "resolver.delimiter",
        });
    }

    let folders = [
        ("resolver.domain_folder_name", options.domain_folder_name.as_deref()),
        ("resolver.pages_folder_name", options.pages_folder_name.as_deref()),
        ("watch.pages_folder", Some(config.watch.pages_folder.as_str())),
    ];
    for (field, value) in folders {
        match value {
            Some("") => errors.push(ValidationError::Empty { field }),
            Some(name) if name.contains('/') => errors.push(ValidationError::NotAFolderName {
                field,
                value: name.to_string(),
            }),
            _ => {}
        }
    }

    if let Some(source) = options.domain_pattern.as_deref() {
        if let Err(e) = DomainPattern::new(source) {
            errors.push(ValidationError::DomainPattern(e.to_string()));
        }
    }

    if config.watch.debounce_ms == 0 {
        errors.push(ValidationError::ZeroDebounce);
    }
    for ext in &config.watch.watch_extensions {
        if !ext.starts_with('.') {
            errors.push(ValidationError::ExtensionWithoutDot(ext.clone()));
        }
    }

    let mut seen = HashSet::new();
    for page in &config.pages {
        if !seen.insert(page.as_str()) {
            errors.push(ValidationError::DuplicatePage(page.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
