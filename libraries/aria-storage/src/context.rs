/// Library facade over the catalog and the persisted stores
use crate::catalog::Catalog;
use crate::favourites::FavouritesStore;
use crate::playlists::PlaylistsStore;
use aria_core::{ArtistId, KeyValueStore, PlaybackLibrary, PlaylistId, Song, SongId};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Everything the player can browse or traverse
///
/// Favourites and playlists sit behind locks so UI code can mutate them
/// through a shared `Arc<Library>` while the playback engine reads
/// snapshots through [`PlaybackLibrary`].
pub struct Library {
    catalog: Catalog,
    favourites: RwLock<FavouritesStore>,
    playlists: RwLock<PlaylistsStore>,
}

impl Library {
    /// Load both stores from `store` and pair them with `catalog`
    pub fn open(catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            favourites: RwLock::new(FavouritesStore::load(store.clone())),
            playlists: RwLock::new(PlaylistsStore::load(store)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favourites(&self) -> RwLockReadGuard<'_, FavouritesStore> {
        self.favourites.read()
    }

    pub fn favourites_mut(&self) -> RwLockWriteGuard<'_, FavouritesStore> {
        self.favourites.write()
    }

    pub fn playlists(&self) -> RwLockReadGuard<'_, PlaylistsStore> {
        self.playlists.read()
    }

    pub fn playlists_mut(&self) -> RwLockWriteGuard<'_, PlaylistsStore> {
        self.playlists.write()
    }
}

impl PlaybackLibrary for Library {
    fn catalog_songs(&self) -> Vec<Song> {
        self.catalog.list_all().to_vec()
    }

    fn featured_songs(&self) -> Vec<Song> {
        self.catalog.list_featured().to_vec()
    }

    fn artist_songs(&self, id: &ArtistId) -> Vec<Song> {
        self.catalog.songs_by_artist(id)
    }

    fn artist_for_song(&self, id: &SongId) -> Option<ArtistId> {
        self.catalog.artist_of(id).map(|artist| artist.id.clone())
    }

    fn playlist_songs(&self, id: &PlaylistId) -> Vec<Song> {
        self.playlists
            .read()
            .get(id)
            .map(|playlist| playlist.songs)
            .unwrap_or_default()
    }

    fn favourite_songs(&self) -> Vec<Song> {
        self.favourites.read().list()
    }
}
