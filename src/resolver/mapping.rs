//! Page loaders and the path-keyed mapping that owns them.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt, Shared};

use crate::error::LoadError;

/// Outcome of loading a page.
pub type LoadResult<T> = Result<T, LoadError>;

/// Boxed future produced by a loader.
pub type PageFuture<T> = BoxFuture<'static, LoadResult<T>>;

/// Zero-argument producer behind [`PageLoader::Lazy`].
pub type LoaderFn<T> = Arc<dyn Fn() -> PageFuture<T> + Send + Sync>;

/// How a page module is obtained.
pub enum PageLoader<T> {
    /// Already pending; every load awaits the same shared result.
    Eager(Shared<PageFuture<T>>),
    /// Invoked on each load.
    Lazy(LoaderFn<T>),
}

impl<T> PageLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn eager<F>(pending: F) -> Self
    where
        F: Future<Output = LoadResult<T>> + Send + 'static,
    {
        Self::Eager(pending.boxed().shared())
    }

    /// An eager loader that is already complete.
    pub fn ready(page: T) -> Self {
        Self::eager(future::ready(Ok(page)))
    }

    pub fn lazy<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = LoadResult<T>> + Send + 'static,
    {
        Self::Lazy(Arc::new(move || producer().boxed()))
    }

    /// Obtain the page: await the shared value, or call the producer.
    pub fn load(&self) -> PageFuture<T> {
        match self {
            Self::Eager(pending) => pending.clone().boxed(),
            Self::Lazy(producer) => producer(),
        }
    }
}

impl<T> Clone for PageLoader<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Eager(pending) => Self::Eager(pending.clone()),
            Self::Lazy(producer) => Self::Lazy(Arc::clone(producer)),
        }
    }
}

impl<T> fmt::Debug for PageLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(_) => f.write_str("PageLoader::Eager"),
            Self::Lazy(_) => f.write_str("PageLoader::Lazy"),
        }
    }
}

/// Path keys mapped to page loaders.
///
/// Keys iterate in sorted order, which makes extension detection order
/// deterministic.
pub struct PageMapping<T> {
    entries: BTreeMap<String, PageLoader<T>>,
}

impl<T> PageMapping<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a loader, replacing any previous one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, loader: PageLoader<T>) -> Option<PageLoader<T>> {
        self.entries.insert(key.into(), loader)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, loader: PageLoader<T>) -> Self {
        self.insert(key, loader);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PageLoader<T>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for PageMapping<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PageMapping<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> fmt::Debug for PageMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<T, K: Into<String>> FromIterator<(K, PageLoader<T>)> for PageMapping<T> {
    fn from_iter<I: IntoIterator<Item = (K, PageLoader<T>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
