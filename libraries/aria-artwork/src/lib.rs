//! Aria Artwork - Artwork preload cache
//!
//! Loads cover images ahead of display so artist pages and the player bar
//! render without flicker.
//!
//! # Features
//!
//! - Explicitly owned [`ImageCache`] service, shared through `Arc`
//! - Per-URI load states (`Unloaded`, `Loading`, `Loaded`)
//! - Concurrent requests for one URI share a single fetch
//! - Failed loads are forgotten so a later request retries
//! - LRU bound on loaded images
//! - Base64 / data-URI encoding for `<img src>`
//!
//! # Example
//!
//! ```no_run
//! use aria_artwork::{FsFetcher, ImageCache};
//! use std::sync::Arc;
//!
//! # async fn run() -> aria_artwork::Result<()> {
//! let cache = ImageCache::new(Arc::new(FsFetcher::new("./public")), 200);
//!
//! let artwork = cache.preload("/images/music/blue-hour.jpg").await?;
//! println!("{} bytes, {}", artwork.data.len(), artwork.mime_type);
//! let src = artwork.to_data_uri();
//! # let _ = src;
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod fetcher;
mod types;

// Re-export public API
pub use cache::{ImageCache, LoadState};
pub use error::{ArtworkError, Result};
pub use fetcher::{ArtworkFetcher, FsFetcher};
pub use types::ArtworkData;
