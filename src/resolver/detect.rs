//! Detection over mapping keys: domain mode, domains, extensions.
//!
//! All functions are pure over the key iterator; caching is the resolver's
//! concern.

use std::collections::BTreeSet;

use super::path::FolderLayout;

/// Domain mode is on iff some key follows the domain folder layout.
pub fn domain_mode<'a>(keys: impl IntoIterator<Item = &'a str>, layout: &FolderLayout) -> bool {
    keys.into_iter().any(|key| layout.is_domain_path(key))
}

/// Every domain segment found in the keys.
pub fn extract_domains<'a>(
    keys: impl IntoIterator<Item = &'a str>,
    layout: &FolderLayout,
) -> BTreeSet<String> {
    keys.into_iter()
        .filter_map(|key| layout.domain_of(key))
        .map(str::to_string)
        .collect()
}

/// Trailing extension of a key: the text after the final dot, if it holds no slash.
pub fn extension_of(key: &str) -> Option<&str> {
    let (_, ext) = key.rsplit_once('.')?;
    (!ext.is_empty() && !ext.contains('/')).then_some(ext)
}

/// Distinct extensions, in the order first seen.
pub fn detect_extensions<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for ext in keys.into_iter().filter_map(extension_of) {
        if !found.iter().any(|seen| seen == ext) {
            found.push(ext.to_string());
        }
    }
    found
}
