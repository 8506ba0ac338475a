//! Page resolver: configuration, detection caches, resolution.
//!
//! # Responsibilities
//! - Own the page mapping and the effective settings
//! - Classify domain mode and detect extensions once per mapping
//! - Turn page names into candidate paths and load the first match
//!
//! # Design Decisions
//! - `resolve` takes `&self`; only `configure` and `reload_pages` mutate
//! - The domain set is computed lazily, at most once per mapping
//! - Loader failures move on to the next name; domain syntax errors abort

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use crate::config::schema::{ResolverOptions, ResolverSettings};
use crate::error::{ResolveError, ResolveResult};
use crate::host::HostEnvironment;
use crate::observability::metrics::{self, Outcome};

use super::detect;
use super::mapping::{LoadResult, PageMapping};
use super::path::{ExtensionPlan, FolderLayout, PagePath};
use super::pattern::DomainPattern;

static NO_DOMAINS: BTreeSet<String> = BTreeSet::new();

/// One page name, or alternatives tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNames(Vec<String>);

impl PageNames {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for PageNames {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for PageNames {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<&String> for PageNames {
    fn from(name: &String) -> Self {
        Self(vec![name.clone()])
    }
}

impl From<Vec<String>> for PageNames {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<Vec<&str>> for PageNames {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for PageNames {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|name| name.to_string()).collect())
    }
}

impl From<&[String]> for PageNames {
    fn from(names: &[String]) -> Self {
        Self(names.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for PageNames {
    fn from(names: [&str; N]) -> Self {
        Self(names.into_iter().map(String::from).collect())
    }
}

/// Snapshot of what the resolver detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverSummary {
    pub domain_mode: bool,
    pub domains: Vec<String>,
    pub extensions: Vec<String>,
    pub effective_extension: Option<String>,
    pub domain_pattern: String,
    pub pages: Vec<String>,
}

/// Resolves page names to entries of a page mapping.
pub struct PageResolver<T> {
    pages: PageMapping<T>,
    settings: ResolverSettings,
    pattern: DomainPattern,
    layout: FolderLayout,
    host: HostEnvironment,
    domain_mode: bool,
    domains: OnceLock<BTreeSet<String>>,
    extensions: Vec<String>,
    adopted_extension: Option<String>,
}

impl<T> PageResolver<T> {
    /// Create an unconfigured, headless resolver.
    pub fn new() -> Self {
        Self::with_host(HostEnvironment::Headless)
    }

    pub fn with_host(host: HostEnvironment) -> Self {
        Self {
            pages: PageMapping::new(),
            settings: ResolverSettings::default(),
            pattern: DomainPattern::default(),
            layout: FolderLayout::default(),
            host,
            domain_mode: false,
            domains: OnceLock::new(),
            extensions: Vec::new(),
            adopted_extension: None,
        }
    }

    /// Replace the mapping and options, then re-run detection.
    ///
    /// Options are validated before anything changes, so a rejected call
    /// leaves the resolver as it was.
    pub fn configure(
        &mut self,
        pages: PageMapping<T>,
        options: ResolverOptions,
    ) -> ResolveResult<&mut Self> {
        let settings = self.settings.merge(&options);
        if settings.delimiter.is_empty() {
            return Err(ResolveError::configuration("delimiter", "must not be empty"));
        }

        let pattern = match options.domain_pattern.as_deref() {
            Some(source) => DomainPattern::new(source)?,
            None => self.pattern.clone(),
        };
        let layout = FolderLayout::new(&settings.domain_folder_name, &settings.pages_folder_name)?;

        self.pages = pages;
        self.settings = settings;
        self.pattern = pattern;
        self.layout = layout;
        self.reset_caches();
        self.log_information();

        Ok(self)
    }

    /// Swap in a new mapping and rebuild the derived caches.
    pub fn reload_pages(&mut self, pages: PageMapping<T>) {
        self.pages = pages;
        self.reset_caches();

        if self.settings.debug_logging {
            tracing::info!(pages = self.pages.len(), "Pages reloaded and cache cleared");
        }
    }

    fn reset_caches(&mut self) {
        self.domains = OnceLock::new();
        self.extensions.clear();
        self.adopted_extension = None;

        self.detect_domain_usage();
        self.detect_page_extensions();
    }

    fn detect_domain_usage(&mut self) {
        self.domain_mode = detect::domain_mode(self.pages.keys(), &self.layout);

        if self.settings.debug_logging {
            tracing::info!(enabled = self.domain_mode, "Domain mode determined");
        }
    }

    fn detect_page_extensions(&mut self) {
        if let Some(ext) = &self.settings.explicit_extension {
            if self.settings.debug_logging {
                tracing::info!(extension = %ext, "Using configured page extension");
            }
            return;
        }
        if !self.settings.auto_detect_extension {
            return;
        }

        self.extensions = detect::detect_extensions(self.pages.keys());
        metrics::record_cache_rebuild("extensions");

        if let [only] = self.extensions.as_slice() {
            self.adopted_extension = Some(only.clone());
        }

        if self.settings.debug_logging {
            tracing::info!(extensions = ?self.extensions, "Auto-detected extensions");
            if let Some(ext) = &self.adopted_extension {
                tracing::info!(extension = %ext, "Using default extension");
            }
        }
    }

    /// Known domains, computed on first use.
    fn domains(&self) -> &BTreeSet<String> {
        let debug = self.settings.debug_logging;

        if !self.domain_mode {
            if debug {
                tracing::debug!("Domain mode disabled, no domains to extract");
            }
            return &NO_DOMAINS;
        }

        if let Some(domains) = self.domains.get() {
            if debug {
                tracing::debug!("Using cached domains");
            }
            return domains;
        }

        self.domains.get_or_init(|| {
            if debug {
                tracing::warn!("Extracting domains from pages");
            }
            let domains = detect::extract_domains(self.pages.keys(), &self.layout);
            metrics::record_cache_rebuild("domains");
            if debug {
                tracing::info!(domains = ?domains, "Found domains");
            }
            domains
        })
    }

    fn extension_plan(&self) -> ExtensionPlan<'_> {
        if let Some(ext) = self.effective_extension() {
            ExtensionPlan::Single(ext)
        } else if self.settings.auto_detect_extension && !self.extensions.is_empty() {
            ExtensionPlan::Detected(&self.extensions)
        } else {
            ExtensionPlan::Fallback
        }
    }

    /// Candidate paths for a page name, in priority order.
    pub fn build_page_path(&self, input: &str) -> ResolveResult<PagePath> {
        let (raw_domain, page_part) = match self.pattern.split(input) {
            Some(found) => found.parts().ok_or_else(|| ResolveError::DomainSyntax {
                input: input.to_string(),
                delimiter: self.settings.delimiter.clone(),
            })?,
            None => (self.settings.default_domain.as_str(), input),
        };

        let segments: Vec<&str> = page_part.split(self.settings.delimiter.as_str()).collect();

        // Multi-domain and wildcard tokens pass through uninterpreted.
        let domain = if self.domains().contains(raw_domain)
            || raw_domain.contains(',')
            || raw_domain.contains('*')
        {
            raw_domain
        } else {
            self.settings.default_domain.as_str()
        };

        let base = self
            .layout
            .base_path(self.domain_mode.then_some(domain), &segments);
        let path = PagePath {
            domain: domain.to_string(),
            candidates: self.extension_plan().candidates(&base),
        };

        if self.settings.debug_logging {
            tracing::debug!(input, primary = path.primary(), "Resolved primary path");
            tracing::debug!(candidates = ?path.candidates, "Possible paths");
        }

        Ok(path)
    }

    /// Server-injected page props from the host document, if any.
    pub fn client_page_props(&self) -> Option<String> {
        let props = self.host.page_props(
            &self.settings.host_element_id,
            &self.settings.host_data_attribute,
        )?;

        if self.settings.debug_logging {
            tracing::debug!(
                element = %self.settings.host_element_id,
                bytes = props.len(),
                "Read client page props"
            );
        }
        Some(props)
    }

    fn log_information(&self) {
        if !self.settings.debug_logging {
            return;
        }

        tracing::info!(
            domains = ?self.domains(),
            extensions = ?self.extensions,
            pages = ?self.available_pages(),
            "Page resolver information"
        );
    }

    pub fn is_domain_mode(&self) -> bool {
        self.domain_mode
    }

    /// Explicit extension, or the single auto-detected one.
    pub fn effective_extension(&self) -> Option<&str> {
        self.settings
            .explicit_extension
            .as_deref()
            .or(self.adopted_extension.as_deref())
    }

    /// Cached domains; empty until the first lookup needs them.
    pub fn detected_domains(&self) -> Vec<String> {
        self.domains
            .get()
            .map(|domains| domains.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn detected_extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn available_pages(&self) -> Vec<&str> {
        self.pages.keys().collect()
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn domain_pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn pages(&self) -> &PageMapping<T> {
        &self.pages
    }

    pub fn summary(&self) -> ResolverSummary {
        ResolverSummary {
            domain_mode: self.domain_mode,
            domains: self.domains().iter().cloned().collect(),
            extensions: self.extensions.clone(),
            effective_extension: self.effective_extension().map(str::to_string),
            domain_pattern: self.domain_pattern().to_string(),
            pages: self.pages.keys().map(str::to_string).collect(),
        }
    }
}

impl<T> PageResolver<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Load the page for the first name that matches.
    pub async fn resolve(&self, names: impl Into<PageNames>) -> ResolveResult<T> {
        let names = names.into();
        let debug = self.settings.debug_logging;

        for name in names.iter() {
            let path = match self.build_page_path(name) {
                Ok(path) => path,
                Err(err) => {
                    if err.is_domain_syntax() {
                        metrics::record_resolution(Outcome::DomainSyntax);
                    }
                    return Err(err);
                }
            };

            match self.load_first(&path).await {
                Some(Ok(page)) => {
                    metrics::record_resolution(Outcome::Resolved);
                    return Ok(page);
                }
                Some(Err(err)) => {
                    if debug {
                        tracing::error!(page = %name, error = %err, "Error resolving page");
                    }
                }
                None => {
                    if debug {
                        tracing::warn!(page = %name, "Page not found");
                        tracing::info!(tried = ?path.candidates, "Tried paths");
                    }
                }
            }
        }

        metrics::record_resolution(Outcome::NotFound);
        Err(ResolveError::PageNotFound {
            names: names.into_vec(),
        })
    }

    async fn load_first(&self, path: &PagePath) -> Option<LoadResult<T>> {
        let loader = path
            .candidates
            .iter()
            .find_map(|candidate| self.pages.get(candidate))?;

        self.client_page_props();
        Some(loader.load().await)
    }
}

impl<T> Default for PageResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PageResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageResolver")
            .field("settings", &self.settings)
            .field("domain_pattern", &self.pattern.as_str())
            .field("host", &self.host)
            .field("domain_mode", &self.domain_mode)
            .field("extensions", &self.extensions)
            .field("pages", &self.pages.len())
            .finish()
    }
}

/// Configure a fresh resolver and resolve `names` against `pages`.
pub async fn resolve_page_component<T>(
    names: impl Into<PageNames>,
    pages: PageMapping<T>,
    options: ResolverOptions,
) -> ResolveResult<T>
where
    T: Clone + Send + Sync + 'static,
{
    let mut resolver = PageResolver::new();
    resolver.configure(pages, options)?.resolve(names).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::host::StaticDocument;
    use crate::resolver::mapping::PageLoader;

    fn mapping(keys: &[&str]) -> PageMapping<String> {
        keys.iter()
            .map(|key| (key.to_string(), PageLoader::ready(key.to_string())))
            .collect()
    }

    fn configured(keys: &[&str], options: ResolverOptions) -> PageResolver<String> {
        let mut resolver = PageResolver::new();
        resolver.configure(mapping(keys), options).unwrap();
        resolver
    }

    #[test]
    fn test_flat_path_with_adopted_extension() {
        let resolver = configured(&["../pages/home.tsx"], ResolverOptions::default());
        assert!(!resolver.is_domain_mode());
        assert_eq!(resolver.effective_extension(), Some("tsx"));

        let path = resolver.build_page_path("blog.show").unwrap();
        assert_eq!(path.domain, "main");
        assert_eq!(path.candidates, vec!["../pages/blog/show.tsx"]);
    }

    #[test]
    fn test_detected_extensions_become_candidates() {
        let resolver = configured(
            &["../pages/about.vue", "../pages/home.tsx"],
            ResolverOptions::default(),
        );
        assert_eq!(resolver.effective_extension(), None);
        assert_eq!(resolver.detected_extensions(), ["vue", "tsx"]);

        let path = resolver.build_page_path("home").unwrap();
        assert_eq!(path.candidates, vec!["../pages/home.vue", "../pages/home.tsx"]);
        assert_eq!(path.primary(), "../pages/home.vue");
    }

    #[test]
    fn test_fallback_extensions_without_detection() {
        let resolver = configured(
            &["../pages/home.tsx"],
            ResolverOptions {
                auto_detect_extension: Some(false),
                ..Default::default()
            },
        );
        assert!(resolver.detected_extensions().is_empty());
        let path = resolver.build_page_path("home").unwrap();
        assert_eq!(path.candidates.len(), 4);
        assert_eq!(path.primary(), "../pages/home.tsx");
        assert_eq!(path.candidates[3], "../pages/home.svelte");
    }

    #[test]
    fn test_explicit_extension_skips_detection() {
        let resolver = configured(
            &["../pages/home.tsx", "../pages/about.vue"],
            ResolverOptions {
                explicit_extension: Some("jsx".into()),
                ..Default::default()
            },
        );
        assert!(resolver.detected_extensions().is_empty());
        assert_eq!(
            resolver.build_page_path("home").unwrap().candidates,
            vec!["../pages/home.jsx"]
        );
    }

    #[test]
    fn test_domain_paths() {
        let resolver = configured(
            &[
                "../domains/blog/pages/home.tsx",
                "../domains/main/pages/home.tsx",
            ],
            ResolverOptions::default(),
        );
        assert!(resolver.is_domain_mode());

        let path = resolver.build_page_path("[blog]::home").unwrap();
        assert_eq!(path.domain, "blog");
        assert_eq!(path.candidates, vec!["../domains/blog/pages/home.tsx"]);

        let path = resolver.build_page_path("[shop]::home").unwrap();
        assert_eq!(path.domain, "main");

        let path = resolver.build_page_path("home").unwrap();
        assert_eq!(path.candidates, vec!["../domains/main/pages/home.tsx"]);
    }

    #[test]
    fn test_wildcard_domains_pass_through() {
        let resolver = configured(&["../domains/blog/pages/home.tsx"], ResolverOptions::default());
        assert_eq!(resolver.build_page_path("[*]::home").unwrap().domain, "*");
        assert_eq!(
            resolver.build_page_path("[blog,shop]::home").unwrap().candidates,
            vec!["../domains/blog,shop/pages/home.tsx"]
        );
    }

    #[test]
    fn test_domain_syntax_errors() {
        let resolver = configured(&["../pages/home.tsx"], ResolverOptions::default());
        for input in ["[]::home", "[blog]::", "[]::"] {
            let err = resolver.build_page_path(input).unwrap_err();
            assert!(err.is_domain_syntax(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_custom_delimiter_and_pattern() {
        let resolver = configured(
            &["../domains/admin/pages/users/index.tsx"],
            ResolverOptions {
                delimiter: Some("/".into()),
                domain_pattern: Some(r"^([a-z]+):(.+)$".into()),
                ..Default::default()
            },
        );
        let path = resolver.build_page_path("admin:users/index").unwrap();
        assert_eq!(path.candidates, vec!["../domains/admin/pages/users/index.tsx"]);
    }

    #[test]
    fn test_invalid_pattern_leaves_state_untouched() {
        let mut resolver = configured(&["../pages/home.tsx"], ResolverOptions::default());
        let err = resolver
            .configure(
                mapping(&["../pages/other.vue"]),
                ResolverOptions {
                    domain_pattern: Some(r"^(.+)$".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid domain pattern"));
        assert_eq!(resolver.available_pages(), vec!["../pages/home.tsx"]);
        assert_eq!(resolver.effective_extension(), Some("tsx"));
    }

    #[test]
    fn test_empty_delimiter_is_rejected() {
        let mut resolver: PageResolver<String> = PageResolver::new();
        let err = resolver
            .configure(
                PageMapping::new(),
                ResolverOptions {
                    delimiter: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ResolveError::Configuration { .. }));
    }

    #[test]
    fn test_options_persist_across_configure() {
        let mut resolver = configured(
            &["../pages/home.tsx"],
            ResolverOptions {
                default_domain: Some("web".into()),
                domain_pattern: Some(r"^([a-z]+)@(.+)$".into()),
                ..Default::default()
            },
        );
        resolver
            .configure(mapping(&["../pages/home.tsx"]), ResolverOptions::default())
            .unwrap();
        assert_eq!(resolver.settings().default_domain, "web");
        assert_eq!(resolver.domain_pattern(), r"^([a-z]+)@(.+)$");
    }

    #[test]
    fn test_domains_are_cached_lazily() {
        let resolver = configured(
            &["../domains/blog/pages/home.tsx", "../domains/shop/pages/cart.tsx"],
            ResolverOptions::default(),
        );
        assert!(resolver.detected_domains().is_empty());

        resolver.build_page_path("[blog]::home").unwrap();
        assert_eq!(resolver.detected_domains(), vec!["blog", "shop"]);
    }

    #[test]
    fn test_reconfigure_drops_stale_domains() {
        let mut resolver = configured(&["../domains/blog/pages/home.tsx"], ResolverOptions::default());
        resolver.build_page_path("home").unwrap();
        assert_eq!(resolver.detected_domains(), vec!["blog"]);

        resolver
            .configure(mapping(&["../domains/shop/pages/home.tsx"]), ResolverOptions::default())
            .unwrap();
        assert!(resolver.detected_domains().is_empty());
        assert_eq!(resolver.build_page_path("[blog]::home").unwrap().domain, "main");
        assert_eq!(resolver.detected_domains(), vec!["shop"]);
    }

    #[test]
    fn test_reload_redetects_extension() {
        let mut resolver = configured(&["../pages/home.tsx"], ResolverOptions::default());
        assert_eq!(resolver.effective_extension(), Some("tsx"));

        resolver.reload_pages(mapping(&["../pages/home.vue"]));
        assert_eq!(resolver.effective_extension(), Some("vue"));

        resolver.reload_pages(mapping(&["../pages/home.vue", "../pages/list.svelte"]));
        assert_eq!(resolver.effective_extension(), None);
        assert_eq!(resolver.detected_extensions(), ["vue", "svelte"]);
    }

    #[test]
    fn test_summary() {
        let resolver = configured(
            &["../domains/blog/pages/home.tsx"],
            ResolverOptions::default(),
        );
        let summary = resolver.summary();
        assert!(summary.domain_mode);
        assert_eq!(summary.domains, vec!["blog"]);
        assert_eq!(summary.effective_extension.as_deref(), Some("tsx"));
        assert_eq!(summary.pages, vec!["../domains/blog/pages/home.tsx"]);
    }

    #[tokio::test]
    async fn test_resolve_first_matching_name() {
        let resolver = configured(&["../pages/home.tsx"], ResolverOptions::default());
        let page = resolver.resolve(["home-localized", "home"]).await.unwrap();
        assert_eq!(page, "../pages/home.tsx");
    }

    #[tokio::test]
    async fn test_resolve_skips_failing_loader() {
        let pages = mapping(&["../pages/home.tsx"]).with(
            "../pages/broken.tsx",
            PageLoader::lazy(|| async { Err(LoadError::new("chunk failed")) }),
        );
        let mut resolver = PageResolver::new();
        resolver
            .configure(
                pages,
                ResolverOptions {
                    debug_logging: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(resolver.resolve(["broken", "home"]).await.unwrap(), "../pages/home.tsx");

        let err = resolver.resolve("broken").await.unwrap_err();
        assert!(matches!(err, ResolveError::PageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_domain_syntax_aborts_resolution() {
        let resolver = configured(&["../pages/home.tsx"], ResolverOptions::default());
        let err = resolver.resolve(["[]::home", "home"]).await.unwrap_err();
        assert!(err.is_domain_syntax());
    }

    #[tokio::test]
    async fn test_not_found_lists_every_name() {
        let resolver = configured(&["../pages/home.tsx"], ResolverOptions::default());
        let err = resolver.resolve(vec!["missing", "gone"]).await.unwrap_err();
        assert_eq!(err.to_string(), "Page not found: missing, gone");
    }

    #[tokio::test]
    async fn test_browser_host_reads_props_on_resolve() {
        let doc = StaticDocument::new().with_attribute("root", "data-props", r#"{"user":1}"#);
        let mut resolver = PageResolver::with_host(HostEnvironment::browser(doc));
        resolver
            .configure(
                mapping(&["../pages/home.tsx"]),
                ResolverOptions {
                    host_element_id: Some("root".into()),
                    host_data_attribute: Some("data-props".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(resolver.client_page_props().as_deref(), Some(r#"{"user":1}"#));
        assert!(resolver.resolve("home").await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_page_component_helper() {
        let page = resolve_page_component(
            "blog.index",
            mapping(&["../pages/blog/index.tsx"]),
            ResolverOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(page, "../pages/blog/index.tsx");
    }
}
