//! Track Collection Store
//!
//! Read-only catalog built once from a static dataset. Artist song lists are
//! derived at load time by exact match of `song.artist` against
//! `artist.name`.

use aria_core::{Artist, ArtistId, Result, Song, SongId};
use serde::Deserialize;
use tracing::info;

/// Dataset bundled with the crate
const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Result caps used by the header quick search
const QUICK_SEARCH_SONGS: usize = 3;
const QUICK_SEARCH_ARTISTS: usize = 2;

#[derive(Deserialize)]
struct Dataset {
    #[serde(default)]
    musics: Vec<Entry>,
    #[serde(default, rename = "featuredMusics")]
    featured_musics: Vec<Entry>,
    #[serde(default)]
    artists: Vec<Artist>,
}

#[derive(Deserialize)]
struct Entry {
    song: Song,
}

/// Songs and artists matching a search query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub songs: Vec<Song>,
    pub artists: Vec<Artist>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty() && self.artists.is_empty()
    }
}

/// Static song catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    featured: Vec<Song>,
    artists: Vec<Artist>,
}

impl Catalog {
    /// Build a catalog, deriving each artist's song list from `songs`
    pub fn new(songs: Vec<Song>, featured: Vec<Song>, mut artists: Vec<Artist>) -> Self {
        for artist in &mut artists {
            artist.songs = songs
                .iter()
                .filter(|s| s.artist == artist.name)
                .cloned()
                .collect();
        }
        Self {
            songs,
            featured,
            artists,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the `{musics, featuredMusics, artists}` dataset shape
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        let catalog = Self::new(
            dataset.musics.into_iter().map(|e| e.song).collect(),
            dataset.featured_musics.into_iter().map(|e| e.song).collect(),
            dataset.artists,
        );
        info!(
            "Catalog loaded: {} songs, {} featured, {} artists",
            catalog.songs.len(),
            catalog.featured.len(),
            catalog.artists.len()
        );
        Ok(catalog)
    }

    /// Load the dataset shipped inside this crate
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// All songs, catalog order
    pub fn list_all(&self) -> &[Song] {
        &self.songs
    }

    pub fn list_featured(&self) -> &[Song] {
        &self.featured
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn find_song(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == id)
    }

    pub fn find_artist(&self, id: &ArtistId) -> Option<&Artist> {
        self.artists.iter().find(|a| &a.id == id)
    }

    /// Songs of an artist; empty when the artist is unknown
    pub fn songs_by_artist(&self, id: &ArtistId) -> Vec<Song> {
        self.find_artist(id)
            .map(|a| a.songs.clone())
            .unwrap_or_default()
    }

    /// First artist whose song list contains `id`
    pub fn artist_of(&self, id: &SongId) -> Option<&Artist> {
        self.artists.iter().find(|a| a.has_song(id))
    }

    /// Case-insensitive substring search over titles and artist names
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> SearchResults {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return SearchResults::default();
        }

        let songs = self
            .songs
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&query) || s.artist.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        let artists = self
            .artists
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&query))
            .cloned()
            .collect();

        SearchResults { songs, artists }
    }

    /// Search capped to the few results shown in the header dropdown
    pub fn quick_search(&self, query: &str) -> SearchResults {
        let mut results = self.search(query);
        results.songs.truncate(QUICK_SEARCH_SONGS);
        results.artists.truncate(QUICK_SEARCH_ARTISTS);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: ArtistId::new(id),
            name: name.to_string(),
            photo: String::new(),
            description: None,
            bg_color: None,
            bg_color_light: None,
            songs: Vec::new(),
        }
    }

    fn small_catalog() -> Catalog {
        Catalog::new(
            vec![
                Song::new("a", "Morning", "Ada", 100.0),
                Song::new("b", "Evening", "Bo", 100.0),
                Song::new("c", "Midnight", "Ada", 100.0),
                Song::new("d", "Noon", "ada", 100.0),
            ],
            vec![Song::new("b", "Evening", "Bo", 100.0)],
            vec![artist("1", "Ada"), artist("2", "Bo"), artist("3", "Cy")],
        )
    }

    #[test]
    fn artist_songs_use_exact_name_match() {
        let catalog = small_catalog();
        let ids: Vec<_> = catalog
            .songs_by_artist(&ArtistId::new("1"))
            .into_iter()
            .map(|s| s.id)
            .collect();
        // "ada" (lowercase) is a different artist
        assert_eq!(ids, vec![SongId::new("a"), SongId::new("c")]);
        assert!(catalog.songs_by_artist(&ArtistId::new("3")).is_empty());
        assert!(catalog.songs_by_artist(&ArtistId::new("404")).is_empty());
    }

    #[test]
    fn reverse_lookup_finds_owner() {
        let catalog = small_catalog();
        assert_eq!(
            catalog.artist_of(&SongId::new("c")).map(|a| a.id.as_str()),
            Some("1")
        );
        assert!(catalog.artist_of(&SongId::new("d")).is_none());
    }

    #[test]
    fn lookups_return_none_when_missing() {
        let catalog = small_catalog();
        assert!(catalog.find_song(&SongId::new("zzz")).is_none());
        assert!(catalog.find_artist(&ArtistId::new("zzz")).is_none());
        assert_eq!(
            catalog.find_song(&SongId::new("b")).map(|s| s.title.as_str()),
            Some("Evening")
        );
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = small_catalog();
        let results = catalog.search("  ADA ");
        assert_eq!(results.songs.len(), 3);
        assert_eq!(results.artists.len(), 1);

        let by_title = catalog.search("night");
        assert_eq!(by_title.songs.len(), 1);
        assert!(by_title.artists.is_empty());
    }

    #[test]
    fn blank_search_matches_nothing() {
        assert!(small_catalog().search("   ").is_empty());
    }

    #[test]
    fn quick_search_caps_results() {
        let catalog = small_catalog();
        let results = catalog.quick_search("a");
        assert!(results.songs.len() <= 3);
        assert!(results.artists.len() <= 2);
    }

    #[test]
    fn bundled_dataset_parses() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.list_all().len(), 8);
        assert_eq!(catalog.list_featured().len(), 3);
        assert_eq!(catalog.songs_by_artist(&ArtistId::new("1")).len(), 3);
        assert!(catalog.songs_by_artist(&ArtistId::new("4")).is_empty());
        assert!(catalog.artist_of(&SongId::new("7")).is_none());
    }

    #[test]
    fn malformed_dataset_is_an_error() {
        assert!(Catalog::from_json("{\"musics\": 3}").is_err());
        assert!(Catalog::from_json("{}").unwrap().list_all().is_empty());
    }
}
