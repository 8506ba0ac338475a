//! Resolver counters.
//!
//! # Metrics
//! - `page_resolver_resolutions_total` (counter): `outcome` = resolved | not_found | domain_syntax
//! - `page_resolver_cache_rebuilds_total` (counter): `cache` = domains | extensions

/// Outcome of one `resolve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    NotFound,
    DomainSyntax,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Resolved => "resolved",
            Outcome::NotFound => "not_found",
            Outcome::DomainSyntax => "domain_syntax",
        }
    }
}

pub fn record_resolution(outcome: Outcome) {
    metrics::counter!("page_resolver_resolutions_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_cache_rebuild(cache: &'static str) {
    metrics::counter!("page_resolver_cache_rebuilds_total", "cache" => cache).increment(1);
}
