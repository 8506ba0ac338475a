//! Shared fixtures for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use page_resolver::{LoadError, PageLoader, PageMapping};

/// Mapping whose pages load as their own path.
pub fn mapping(keys: &[&str]) -> PageMapping<String> {
    keys.iter()
        .map(|key| (key.to_string(), PageLoader::ready(key.to_string())))
        .collect()
}

/// A lazy loader that counts its invocations.
#[allow(dead_code)]
pub fn counting_loader(page: &str) -> (PageLoader<String>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let page = page.to_string();

    let loader = PageLoader::lazy(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let page = page.clone();
        async move { Ok(page) }
    });
    (loader, calls)
}

/// A lazy loader that always fails.
#[allow(dead_code)]
pub fn failing_loader(message: &'static str) -> PageLoader<String> {
    PageLoader::lazy(move || async move { Err(LoadError::new(message)) })
}
