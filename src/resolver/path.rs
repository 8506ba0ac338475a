//! Folder conventions and candidate path construction.
//!
//! ```text
//! domain mode:  ../<domain folder>/<domain>/<pages folder>/<a/b/c>.<ext>
//! flat:         ../<pages folder>/<a/b/c>.<ext>
//! ```

use regex::Regex;
use serde::Serialize;

use crate::error::ResolveError;

/// Extensions tried when neither an explicit nor a detected one is known.
pub const FALLBACK_EXTENSIONS: [&str; 4] = ["tsx", "jsx", "vue", "svelte"];

/// Domain and pages folder names, plus the compiled domain scan.
#[derive(Debug, Clone)]
pub struct FolderLayout {
    domain_folder: String,
    pages_folder: String,
    domain_scan: Regex,
}

impl FolderLayout {
    pub fn new(domain_folder: &str, pages_folder: &str) -> Result<Self, ResolveError> {
        let source = format!(
            "{}/([^/]+)/{}/",
            regex::escape(domain_folder),
            regex::escape(pages_folder)
        );
        let domain_scan = Regex::new(&source)
            .map_err(|e| ResolveError::configuration("folder layout", e.to_string()))?;

        Ok(Self {
            domain_folder: domain_folder.to_string(),
            pages_folder: pages_folder.to_string(),
            domain_scan,
        })
    }

    /// Whether a key is laid out as `../<domain folder>/…/<pages folder>/…`.
    pub fn is_domain_path(&self, key: &str) -> bool {
        key.contains(&format!("../{}/", self.domain_folder))
            && key.contains(&format!("/{}/", self.pages_folder))
    }

    /// Domain segment of a key, if it follows the domain layout.
    pub fn domain_of<'k>(&self, key: &'k str) -> Option<&'k str> {
        self.domain_scan
            .captures(key)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Extension-less path for a page.
    pub fn base_path(&self, domain: Option<&str>, segments: &[&str]) -> String {
        let page = segments.join("/");
        match domain {
            Some(domain) => format!(
                "../{}/{}/{}/{}",
                self.domain_folder, domain, self.pages_folder, page
            ),
            None => format!("../{}/{}", self.pages_folder, page),
        }
    }
}

impl Default for FolderLayout {
    fn default() -> Self {
        Self {
            domain_folder: "domains".to_string(),
            pages_folder: "pages".to_string(),
            domain_scan: Regex::new("domains/([^/]+)/pages/").expect("default layout compiles"),
        }
    }
}

/// Which extensions to append to a base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionPlan<'a> {
    /// Explicit or auto-adopted extension.
    Single(&'a str),
    /// Every detected extension, in detection order.
    Detected(&'a [String]),
    /// [`FALLBACK_EXTENSIONS`].
    Fallback,
}

impl ExtensionPlan<'_> {
    pub fn candidates(&self, base: &str) -> Vec<String> {
        match self {
            Self::Single(ext) => vec![format!("{base}.{ext}")],
            Self::Detected(exts) => exts.iter().map(|ext| format!("{base}.{ext}")).collect(),
            Self::Fallback => FALLBACK_EXTENSIONS
                .iter()
                .map(|ext| format!("{base}.{ext}"))
                .collect(),
        }
    }
}

/// Candidate paths computed for one page name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePath {
    /// Effective domain the name resolved to.
    pub domain: String,
    /// Full paths in priority order; never empty.
    pub candidates: Vec<String>,
}

impl PagePath {
    /// First candidate, used for diagnostics.
    pub fn primary(&self) -> &str {
        self.candidates.first().map(String::as_str).unwrap_or_default()
    }
}
