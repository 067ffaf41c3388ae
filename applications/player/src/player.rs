use crate::config::PlayerConfig;
use crate::error::Result;
use aria_artwork::{ArtworkData, ArtworkFetcher, ImageCache};
use aria_core::{KeyValueStore, PlaybackContext, PlaybackLibrary, Song, SongId};
use aria_playback::{MediaElement, PlaybackConfig, PlaybackEngine};
use aria_storage::{Catalog, FileStore, Library, MemoryStore};
use std::sync::Arc;
use tracing::info;

/// One player session: library, playback engine and optional artwork cache
pub struct Player {
    library: Arc<Library>,
    engine: PlaybackEngine,
    artwork: Option<Arc<ImageCache>>,
    artwork_capacity: usize,
}

impl Player {
    /// Build the library and engine described by `config`
    pub fn new(config: &PlayerConfig, media: Box<dyn MediaElement>) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = if config.storage.in_memory {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::new(&config.storage.data_dir))
        };

        let catalog = match config.catalog_path() {
            Some(path) => Catalog::from_json(&std::fs::read_to_string(path)?)?,
            None => Catalog::bundled()?,
        };

        info!(
            "Opening library ({} songs, {} storage)",
            catalog.list_all().len(),
            if config.storage.in_memory { "memory" } else { "file" }
        );
        let library = Arc::new(Library::open(catalog, store));

        let mut player = Self::with_parts(library, media, config.playback.clone());
        player.artwork_capacity = config.artwork.cache_capacity;
        Ok(player)
    }

    /// Build the browser player: `localStorage` persistence and an
    /// `HTMLAudioElement` for playback
    ///
    /// The element queues its events; call [`Player::pump_media_events`]
    /// from the page's frame or timer loop to deliver them.
    #[cfg(feature = "web")]
    pub fn in_browser(config: &PlayerConfig) -> Result<Self> {
        let library = Arc::new(Library::open(
            Catalog::bundled()?,
            Arc::new(aria_storage::LocalStore::new()),
        ));
        let media = aria_playback::web::HtmlAudioMedia::new()?;

        let mut player = Self::with_parts(library, Box::new(media), config.playback.clone());
        player.artwork_capacity = config.artwork.cache_capacity;
        Ok(player)
    }

    /// Assemble a player from existing parts
    pub fn with_parts(
        library: Arc<Library>,
        media: Box<dyn MediaElement>,
        playback: PlaybackConfig,
    ) -> Self {
        let engine = PlaybackEngine::new(media, library.clone(), playback);
        Self {
            library,
            engine,
            artwork: None,
            artwork_capacity: 200,
        }
    }

    /// Attach an artwork cache backed by `fetcher`
    #[must_use]
    pub fn artwork(mut self, fetcher: Arc<dyn ArtworkFetcher>) -> Self {
        self.artwork = Some(Arc::new(ImageCache::new(fetcher, self.artwork_capacity)));
        self
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PlaybackEngine {
        &mut self.engine
    }

    /// Deliver events queued by the media element to the engine
    pub fn pump_media_events(&mut self) -> usize {
        self.engine.pump_media_events()
    }

    pub fn library(&self) -> &Arc<Library> {
        &self.library
    }

    pub fn image_cache(&self) -> Option<&Arc<ImageCache>> {
        self.artwork.as_ref()
    }

    /// Add or remove `song` from favourites; returns the new membership
    pub fn toggle_favourite(&self, song: &Song) -> Result<bool> {
        Ok(self.library.favourites_mut().toggle(song.clone())?)
    }

    pub fn is_favourite(&self, id: &SongId) -> bool {
        self.library.favourites().contains(id)
    }

    /// Preload artwork for every song of `context`
    ///
    /// Returns nothing when no artwork cache is attached. Songs without an
    /// artwork URI are skipped.
    pub async fn preload_artwork_for(
        &self,
        context: &PlaybackContext,
    ) -> Vec<aria_artwork::Result<Arc<ArtworkData>>> {
        let Some(cache) = &self.artwork else {
            return Vec::new();
        };

        let uris: Vec<String> = self
            .library
            .resolve(context)
            .into_iter()
            .map(|song| song.artwork_uri)
            .filter(|uri| !uri.is_empty())
            .collect();
        cache.preload_many(uris).await
    }
}
