//! Concurrency behaviour of the artwork cache

use aria_artwork::{ArtworkData, ArtworkError, ArtworkFetcher, FsFetcher, ImageCache, LoadState};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Counts fetches; the first `failures` calls fail
struct CountingFetcher {
    calls: AtomicUsize,
    failures: usize,
    delay: Duration,
}

impl CountingFetcher {
    fn new(failures: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failures,
            delay: Duration::from_millis(20),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtworkFetcher for CountingFetcher {
    async fn fetch(&self, uri: &str) -> aria_artwork::Result<ArtworkData> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if call < self.failures {
            return Err(ArtworkError::Fetch(format!("network down ({uri})")));
        }
        Ok(ArtworkData::new(vec![0xFF, 0xD8], "image/jpeg"))
    }
}

#[tokio::test]
async fn concurrent_preloads_share_one_fetch() {
    let fetcher = CountingFetcher::new(0);
    let cache = ImageCache::new(fetcher.clone(), 16);

    let (a, b, c) = tokio::join!(
        cache.preload("/images/a.jpg"),
        cache.preload("/images/a.jpg"),
        cache.preload("/images/a.jpg"),
    );

    assert_eq!(fetcher.calls(), 1);
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&b, &c));
    assert_eq!(cache.state("/images/a.jpg"), LoadState::Loaded);
}

#[tokio::test]
async fn loaded_images_are_served_from_cache() {
    let fetcher = CountingFetcher::new(0);
    let cache = ImageCache::new(fetcher.clone(), 16);

    cache.preload("/images/a.jpg").await.unwrap();
    cache.preload("/images/a.jpg").await.unwrap();

    assert_eq!(fetcher.calls(), 1);
    assert!(cache.is_cached("/images/a.jpg"));
}

#[tokio::test]
async fn failure_is_shared_then_retried() {
    let fetcher = CountingFetcher::new(1);
    let cache = ImageCache::new(fetcher.clone(), 16);

    let (first, second) = tokio::join!(
        cache.preload("/images/a.jpg"),
        cache.preload("/images/a.jpg"),
    );
    assert!(first.is_err());
    assert!(second.is_err());
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(cache.state("/images/a.jpg"), LoadState::Unloaded);

    let retried = cache.preload("/images/a.jpg").await;
    assert!(retried.is_ok());
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(cache.state("/images/a.jpg"), LoadState::Loaded);
}

#[tokio::test]
async fn state_is_loading_while_in_flight() {
    let fetcher = CountingFetcher::new(0);
    let cache = Arc::new(ImageCache::new(fetcher, 16));

    let background = {
        let cache = cache.clone();
        tokio::spawn(async move { cache.preload("/images/slow.jpg").await })
    };
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(cache.state("/images/slow.jpg"), LoadState::Loading);

    background.await.unwrap().unwrap();
    assert_eq!(cache.state("/images/slow.jpg"), LoadState::Loaded);
}

#[tokio::test]
async fn preload_many_keeps_order_and_dedups() {
    let fetcher = CountingFetcher::new(0);
    let cache = ImageCache::new(fetcher.clone(), 16);

    let results = cache
        .preload_many(["/a.jpg", "/b.jpg", "/a.jpg"])
        .await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn filesystem_fetcher_round_trip() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("images/music")).unwrap();
    std::fs::write(dir.path().join("images/music/cover.jpg"), b"jpeg-bytes").unwrap();

    let cache = ImageCache::new(Arc::new(FsFetcher::new(dir.path())), 4);
    let artwork = cache.preload("/images/music/cover.jpg").await.unwrap();

    assert_eq!(artwork.mime_type, "image/jpeg");
    assert!(artwork.to_data_uri().starts_with("data:image/jpeg;base64,"));

    let missing = cache.preload("/images/music/none.jpg").await;
    assert!(matches!(missing, Err(ArtworkError::NotFound(_))));
    assert_eq!(cache.state("/images/music/none.jpg"), LoadState::Unloaded);
}
