//! Playlists store
//!
//! User-defined playlists, persisted as one JSON array under
//! `PLAYLISTS_KEY`. Ids are millisecond timestamps, strictly increasing
//! within a store.

use aria_core::{KeyValueStore, Playlist, PlaylistId, Result, Song, SongId, PLAYLISTS_KEY};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PlaylistsStore {
    backend: Arc<dyn KeyValueStore>,
    playlists: Vec<Playlist>,
    last_id: i64,
}

impl PlaylistsStore {
    /// Load persisted playlists
    ///
    /// Entries with a missing or malformed song list are kept with no songs.
    /// A top-level parse failure is logged and yields an empty collection.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let playlists = match backend.get(PLAYLISTS_KEY) {
            Ok(Some(raw)) => parse(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read playlists: {}", e);
                Vec::new()
            }
        };

        let last_id = playlists
            .iter()
            .filter_map(|p| p.id.as_str().parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        info!("Loaded {} playlists", playlists.len());
        Self {
            backend,
            playlists,
            last_id,
        }
    }

    /// Create an empty playlist and persist it
    ///
    /// The name is truncated to 20 characters.
    pub fn create(&mut self, name: &str) -> Result<Playlist> {
        let id = self.next_id();
        let playlist = Playlist::new(PlaylistId::new(id.to_string()), name);
        debug!("Creating playlist {} ({:?})", playlist.id, playlist.name);

        self.playlists.push(playlist.clone());
        self.persist()?;
        Ok(playlist)
    }

    /// Append a song; no-op for a duplicate or an unknown playlist
    pub fn add_song(&mut self, id: &PlaylistId, song: Song) -> Result<bool> {
        let changed = self
            .find_mut(id)
            .is_some_and(|playlist| playlist.add_song(song));
        self.persist_if(changed)
    }

    pub fn remove_song(&mut self, id: &PlaylistId, song_id: &SongId) -> Result<bool> {
        let changed = self
            .find_mut(id)
            .is_some_and(|playlist| playlist.remove_song(song_id));
        self.persist_if(changed)
    }

    pub fn delete(&mut self, id: &PlaylistId) -> Result<bool> {
        let before = self.playlists.len();
        self.playlists.retain(|p| &p.id != id);
        self.persist_if(self.playlists.len() != before)
    }

    /// Rename a playlist, truncating to 20 characters
    pub fn rename(&mut self, id: &PlaylistId, name: &str) -> Result<bool> {
        let changed = match self.find_mut(id) {
            Some(playlist) => {
                let old = playlist.name.clone();
                playlist.rename(name);
                playlist.name != old
            }
            None => false,
        };
        self.persist_if(changed)
    }

    pub fn get(&self, id: &PlaylistId) -> Option<Playlist> {
        self.playlists.iter().find(|p| &p.id == id).cloned()
    }

    pub fn list(&self) -> Vec<Playlist> {
        self.playlists.clone()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    fn find_mut(&mut self, id: &PlaylistId) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| &p.id == id)
    }

    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    fn persist_if(&self, changed: bool) -> Result<bool> {
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.playlists)?;
        if let Err(e) = self.backend.set(PLAYLISTS_KEY, &json) {
            warn!("Failed to persist playlists: {}", e);
            return Err(e);
        }
        Ok(())
    }
}

/// Lenient collection parse: entries that are not playlists are dropped
fn parse(raw: &str) -> Vec<Playlist> {
    let items = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Discarding malformed playlists data: {}", e);
            return Vec::new();
        }
    };

    let mut playlists: Vec<Playlist> = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Playlist>(item) {
            Ok(playlist) if !playlists.iter().any(|p| p.id == playlist.id) => {
                playlists.push(playlist);
            }
            Ok(playlist) => warn!("Dropping duplicate playlist {}", playlist.id),
            Err(e) => warn!("Dropping malformed playlist entry: {}", e),
        }
    }
    playlists
}
