//! Domain pattern: splits `[domain]::page.path` style names.
//!
//! # Contract
//! - Exactly two capture groups: group 1 is the domain, group 2 the page path
//! - Group count is checked on the compiled regex, never by matching input
//! - A match with a missing or empty group is reported to the caller as such;
//!   turning it into an error is the resolver's job

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ResolveError;

/// Pattern used when none is configured. The page group accepts the empty
/// string so that `[blog]::` is rejected instead of treated as a plain name.
pub const DEFAULT_DOMAIN_PATTERN: &str = r"^\[(.*?)\]::(.*)$";

static DEFAULT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_DOMAIN_PATTERN).expect("default domain pattern compiles")
});

/// Result of matching a name against the domain pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainMatch<'h> {
    /// Non-empty domain capture.
    pub domain: Option<&'h str>,
    /// Non-empty page path capture.
    pub page: Option<&'h str>,
}

impl<'h> DomainMatch<'h> {
    /// Both parts, when both are present.
    pub fn parts(&self) -> Option<(&'h str, &'h str)> {
        self.domain.zip(self.page)
    }
}

/// A validated two-group domain pattern.
#[derive(Debug, Clone)]
pub struct DomainPattern {
    regex: Regex,
}

impl DomainPattern {
    /// Compile and validate a custom pattern.
    pub fn new(source: &str) -> Result<Self, ResolveError> {
        let option = format!("domain pattern `{source}`");
        let regex =
            Regex::new(source).map_err(|e| ResolveError::configuration(&option, e.to_string()))?;

        // captures_len() includes the implicit whole-match group.
        let groups = regex.captures_len() - 1;
        if groups != 2 {
            return Err(ResolveError::configuration(
                option,
                format!(
                    "pattern must contain exactly 2 capturing groups (domain and page), found {groups}"
                ),
            ));
        }

        Ok(Self { regex })
    }

    /// Match `input`, or `None` when the pattern does not apply.
    pub fn split<'h>(&self, input: &'h str) -> Option<DomainMatch<'h>> {
        let caps = self.regex.captures(input)?;
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
        };
        Some(DomainMatch {
            domain: group(1),
            page: group(2),
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for DomainPattern {
    fn default() -> Self {
        Self {
            regex: DEFAULT_REGEX.clone(),
        }
    }
}
