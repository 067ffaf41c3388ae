use crate::error::{ArtworkError, Result};
use crate::fetcher::ArtworkFetcher;
use crate::types::ArtworkData;
use futures_util::future::{join_all, BoxFuture, FutureExt, Shared};
use lru::LruCache;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, warn};

type SharedLoad = Shared<BoxFuture<'static, std::result::Result<Arc<ArtworkData>, ArtworkError>>>;

/// Load state of one artwork URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
}

struct Pending {
    generation: u64,
    load: SharedLoad,
}

struct Inner {
    loaded: LruCache<String, Arc<ArtworkData>>,
    pending: HashMap<String, Pending>,
    generation: u64,
}

/// Artwork preload cache
///
/// One instance per application, shared through `Arc`. The lock is never
/// held across an `.await`.
pub struct ImageCache {
    fetcher: Arc<dyn ArtworkFetcher>,
    inner: Mutex<Inner>,
}

impl ImageCache {
    /// Create a cache holding at most `capacity` loaded images (minimum 1)
    pub fn new(fetcher: Arc<dyn ArtworkFetcher>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            fetcher,
            inner: Mutex::new(Inner {
                loaded: LruCache::new(capacity),
                pending: HashMap::new(),
                generation: 0,
            }),
        }
    }

    /// Load `uri`, reusing a cached image or an in-flight request
    ///
    /// On failure nothing is remembered, so the next call fetches again.
    pub async fn preload(&self, uri: &str) -> Result<Arc<ArtworkData>> {
        let (generation, load) = {
            let mut inner = self.inner.lock();
            if let Some(data) = inner.loaded.get(uri) {
                return Ok(data.clone());
            }

            if let Some(pending) = inner.pending.get(uri) {
                debug!("Joining in-flight artwork load for {}", uri);
                (pending.generation, pending.load.clone())
            } else {
                inner.generation += 1;
                let generation = inner.generation;
                let load = self.start(uri);
                inner.pending.insert(
                    uri.to_string(),
                    Pending {
                        generation,
                        load: load.clone(),
                    },
                );
                (generation, load)
            }
        };

        let result = load.await;

        let mut inner = self.inner.lock();
        let owns_entry = inner
            .pending
            .get(uri)
            .is_some_and(|p| p.generation == generation);
        if owns_entry {
            inner.pending.remove(uri);
            match &result {
                Ok(data) => {
                    inner.loaded.put(uri.to_string(), data.clone());
                }
                Err(e) => warn!("Artwork load failed for {}: {}", uri, e),
            }
        }
        result
    }

    /// Load several URIs concurrently; results keep input order
    pub async fn preload_many<I, S>(&self, uris: I) -> Vec<Result<Arc<ArtworkData>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let uris: Vec<String> = uris.into_iter().map(|u| u.as_ref().to_string()).collect();
        join_all(uris.iter().map(|uri| self.preload(uri))).await
    }

    pub fn state(&self, uri: &str) -> LoadState {
        let inner = self.inner.lock();
        if inner.loaded.contains(uri) {
            LoadState::Loaded
        } else if inner.pending.contains_key(uri) {
            LoadState::Loading
        } else {
            LoadState::Unloaded
        }
    }

    pub fn is_cached(&self, uri: &str) -> bool {
        self.inner.lock().loaded.contains(uri)
    }

    /// Cached image without touching recency
    pub fn get(&self, uri: &str) -> Option<Arc<ArtworkData>> {
        self.inner.lock().loaded.peek(uri).cloned()
    }

    /// Number of loaded images
    pub fn len(&self) -> usize {
        self.inner.lock().loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every loaded image and in-flight request
    ///
    /// Requests already awaiting still complete for their callers but are
    /// not cached.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.loaded.clear();
        inner.pending.clear();
    }

    fn start(&self, uri: &str) -> SharedLoad {
        let fetcher = self.fetcher.clone();
        let uri = uri.to_string();
        async move {
            debug!("Fetching artwork {}", uri);
            fetcher.fetch(&uri).await.map(Arc::new)
        }
        .boxed()
        .shared()
    }
}
