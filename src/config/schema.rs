//! Configuration schema definitions.
//!
//! `ResolverOptions` is what callers hand to `configure`; every field is
//! optional. `ResolverSettings` holds the effective values after merging.
//! `ResolverConfig` is the root of the CLI's TOML file.

use serde::{Deserialize, Serialize};

/// Options accepted by [`PageResolver::configure`](crate::resolver::PageResolver::configure).
///
/// Omitted fields keep their previous value, except `explicit_extension`
/// which is cleared unless supplied again.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverOptions {
    /// Emit structured diagnostics while configuring and resolving.
    pub debug_logging: Option<bool>,

    /// Separator between path segments inside a page name.
    pub delimiter: Option<String>,

    /// Domain used when a name carries none, or an unknown one.
    pub default_domain: Option<String>,

    /// Folder holding one sub-folder per domain.
    pub domain_folder_name: Option<String>,

    /// Folder holding the page files.
    pub pages_folder_name: Option<String>,

    /// Page file extension, bypasses auto-detection.
    pub explicit_extension: Option<String>,

    /// Regex with exactly two capture groups: domain, then page path.
    pub domain_pattern: Option<String>,

    /// Detect page extensions from the mapping keys.
    pub auto_detect_extension: Option<bool>,

    /// Id of the element carrying server-injected page props.
    pub host_element_id: Option<String>,

    /// Attribute on that element holding the props.
    pub host_data_attribute: Option<String>,
}

/// Effective resolver settings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolverSettings {
    pub debug_logging: bool,
    pub delimiter: String,
    pub default_domain: String,
    pub domain_folder_name: String,
    pub pages_folder_name: String,
    pub explicit_extension: Option<String>,
    pub auto_detect_extension: bool,
    pub host_element_id: String,
    pub host_data_attribute: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            delimiter: ".".to_string(),
            default_domain: "main".to_string(),
            domain_folder_name: "domains".to_string(),
            pages_folder_name: "pages".to_string(),
            explicit_extension: None,
            auto_detect_extension: true,
            host_element_id: "app".to_string(),
            host_data_attribute: "data-page".to_string(),
        }
    }
}

impl ResolverSettings {
    /// Layer `options` over these settings.
    pub fn merge(&self, options: &ResolverOptions) -> Self {
        let keep = |value: &Option<String>, previous: &String| {
            value.clone().unwrap_or_else(|| previous.clone())
        };

        Self {
            debug_logging: options.debug_logging.unwrap_or(self.debug_logging),
            delimiter: keep(&options.delimiter, &self.delimiter),
            default_domain: keep(&options.default_domain, &self.default_domain),
            domain_folder_name: keep(&options.domain_folder_name, &self.domain_folder_name),
            pages_folder_name: keep(&options.pages_folder_name, &self.pages_folder_name),
            explicit_extension: options
                .explicit_extension
                .as_deref()
                .map(|ext| ext.trim_start_matches('.'))
                .filter(|ext| !ext.is_empty())
                .map(str::to_string),
            auto_detect_extension: options
                .auto_detect_extension
                .unwrap_or(self.auto_detect_extension),
            host_element_id: keep(&options.host_element_id, &self.host_element_id),
            host_data_attribute: keep(&options.host_data_attribute, &self.host_data_attribute),
        }
    }
}

/// Root of the CLI configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Page path keys, as a build-time glob would produce them.
    pub pages: Vec<String>,

    /// Options passed to `configure`.
    pub resolver: ResolverOptions,

    /// Hot reload settings.
    pub watch: WatchConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Page file watcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Directory watched recursively.
    pub root: String,

    /// Only files below a folder with this name count as pages.
    pub pages_folder: String,

    /// File suffixes that count as pages (with the leading dot).
    pub watch_extensions: Vec<String>,

    /// Quiet period before a batch of changes is flushed, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            pages_folder: "pages".to_string(),
            watch_extensions: [".tsx", ".jsx", ".vue", ".svelte"]
                .into_iter()
                .map(String::from)
                .collect(),
            debounce_ms: 250,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
