//! Favourites store
//!
//! Ordered set of songs (insertion order, unique by id), persisted in full
//! under `FAVOURITES_KEY` after every mutation.

use aria_core::{KeyValueStore, Result, Song, SongId, FAVOURITES_KEY};
use std::sync::Arc;
use tracing::{info, warn};

pub struct FavouritesStore {
    backend: Arc<dyn KeyValueStore>,
    songs: Vec<Song>,
}

impl FavouritesStore {
    /// Load persisted favourites
    ///
    /// Unreadable or malformed data is logged and treated as an empty set.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let songs = match backend.get(FAVOURITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Song>>(&raw) {
                Ok(songs) => dedup(songs),
                Err(e) => {
                    warn!("Discarding malformed favourites data: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read favourites: {}", e);
                Vec::new()
            }
        };

        info!("Loaded {} favourites", songs.len());
        Self { backend, songs }
    }

    /// Add a song; no-op if already present. Returns whether it was added.
    pub fn add(&mut self, song: Song) -> Result<bool> {
        if self.contains(&song.id) {
            return Ok(false);
        }
        self.songs.push(song);
        self.persist()?;
        Ok(true)
    }

    /// Remove a song; no-op if absent. Returns whether it was removed.
    pub fn remove(&mut self, id: &SongId) -> Result<bool> {
        let before = self.songs.len();
        self.songs.retain(|s| &s.id != id);
        if self.songs.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Add if absent, remove if present. Returns the new membership.
    pub fn toggle(&mut self, song: Song) -> Result<bool> {
        if self.contains(&song.id) {
            self.remove(&song.id)?;
            Ok(false)
        } else {
            self.add(song)?;
            Ok(true)
        }
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.songs.iter().any(|s| &s.id == id)
    }

    /// Snapshot in insertion order
    pub fn list(&self) -> Vec<Song> {
        self.songs.clone()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.songs)?;
        if let Err(e) = self.backend.set(FAVOURITES_KEY, &json) {
            warn!("Failed to persist favourites: {}", e);
            return Err(e);
        }
        Ok(())
    }
}

fn dedup(songs: Vec<Song>) -> Vec<Song> {
    let mut unique: Vec<Song> = Vec::with_capacity(songs.len());
    for song in songs {
        if !unique.iter().any(|s| s.id == song.id) {
            unique.push(song);
        }
    }
    unique
}
