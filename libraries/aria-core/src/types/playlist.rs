/// Playlist domain types
use super::ids::{PlaylistId, SongId};
use super::song::Song;
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum playlist name length, in characters
pub const PLAYLIST_NAME_MAX_CHARS: usize = 20;

/// Truncate a playlist name to `PLAYLIST_NAME_MAX_CHARS` characters
pub fn truncate_name(name: &str) -> String {
    name.chars().take(PLAYLIST_NAME_MAX_CHARS).collect()
}

/// Named, ordered list of songs
///
/// A playlist never contains the same song id twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,

    /// Songs in play order; tolerant of missing or malformed persisted data
    #[serde(default, deserialize_with = "deserialize_songs")]
    pub songs: Vec<Song>,
}

impl Playlist {
    /// Create an empty playlist, truncating the name
    pub fn new(id: PlaylistId, name: &str) -> Self {
        Self {
            id,
            name: truncate_name(name),
            songs: Vec::new(),
        }
    }

    /// Whether the playlist contains `id`
    pub fn contains(&self, id: &SongId) -> bool {
        self.songs.iter().any(|s| &s.id == id)
    }

    /// Append a song unless already present; returns whether it was added
    pub fn add_song(&mut self, song: Song) -> bool {
        if self.contains(&song.id) {
            return false;
        }
        self.songs.push(song);
        true
    }

    /// Remove a song by id; returns whether anything was removed
    pub fn remove_song(&mut self, id: &SongId) -> bool {
        let before = self.songs.len();
        self.songs.retain(|s| &s.id != id);
        self.songs.len() != before
    }

    /// Rename, truncating to the maximum length
    pub fn rename(&mut self, name: &str) {
        self.name = truncate_name(name);
    }
}

/// Accept any JSON for `songs`: non-arrays become empty, malformed entries
/// and repeated ids are dropped.
fn deserialize_songs<'de, D>(deserializer: D) -> Result<Vec<Song>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    let mut songs: Vec<Song> = Vec::with_capacity(items.len());
    for item in items {
        if let Ok(song) = serde_json::from_value::<Song>(item) {
            if !songs.iter().any(|s| s.id == song.id) {
                songs.push(song);
            }
        }
    }
    Ok(songs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_truncated_to_twenty_chars() {
        let playlist = Playlist::new(PlaylistId::new("1"), "A very long playlist name indeed");
        assert_eq!(playlist.name, "A very long playlist");
        assert_eq!(playlist.name.chars().count(), PLAYLIST_NAME_MAX_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let name = "é".repeat(25);
        assert_eq!(truncate_name(&name).chars().count(), 20);
    }

    #[test]
    fn add_song_rejects_duplicates() {
        let mut playlist = Playlist::new(PlaylistId::new("1"), "Mix");
        assert!(playlist.add_song(Song::new("s1", "One", "X", 1.0)));
        assert!(!playlist.add_song(Song::new("s1", "One", "X", 1.0)));
        assert_eq!(playlist.songs.len(), 1);
    }

    #[test]
    fn remove_song_reports_change() {
        let mut playlist = Playlist::new(PlaylistId::new("1"), "Mix");
        playlist.add_song(Song::new("s1", "One", "X", 1.0));
        assert!(!playlist.remove_song(&SongId::new("missing")));
        assert!(playlist.remove_song(&SongId::new("s1")));
        assert!(playlist.songs.is_empty());
    }

    #[test]
    fn missing_or_malformed_songs_become_empty() {
        let missing: Playlist = serde_json::from_str(r#"{"id":"1","name":"A"}"#).unwrap();
        assert!(missing.songs.is_empty());

        let not_array: Playlist =
            serde_json::from_str(r#"{"id":"1","name":"A","songs":"oops"}"#).unwrap();
        assert!(not_array.songs.is_empty());

        let null: Playlist = serde_json::from_str(r#"{"id":"1","name":"A","songs":null}"#).unwrap();
        assert!(null.songs.is_empty());
    }

    #[test]
    fn malformed_entries_and_duplicates_are_dropped() {
        let json = r#"{"id":"1","name":"A","songs":[
            {"id":"s1","title":"One","artist":"X"},
            {"bogus":true},
            {"id":"s1","title":"One again","artist":"X"},
            {"id":"s2","title":"Two","artist":"Y"}
        ]}"#;
        let playlist: Playlist = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = playlist.songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }
}
