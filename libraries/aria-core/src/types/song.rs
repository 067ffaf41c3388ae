//! Song type

use super::ids::SongId;
use serde::{Deserialize, Serialize};

/// A playable song from the catalog
///
/// Songs are immutable once loaded; identity is the `id` alone. Field names
/// on the wire follow the bundled catalog (`musicArt`, `musicSrc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,

    /// Nominal length in seconds, as listed by the catalog
    #[serde(default)]
    pub duration: f64,

    #[serde(rename = "musicArt", alias = "artworkUri", default)]
    pub artwork_uri: String,

    #[serde(rename = "musicSrc", alias = "audioUri", default)]
    pub audio_uri: String,
}

impl Song {
    /// Create a song without media URIs
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: f64,
    ) -> Self {
        Self {
            id: SongId::new(id),
            title: title.into(),
            artist: artist.into(),
            duration,
            artwork_uri: String::new(),
            audio_uri: String::new(),
        }
    }

    /// Set the audio source URI
    #[must_use]
    pub fn with_audio_uri(mut self, uri: impl Into<String>) -> Self {
        self.audio_uri = uri.into();
        self
    }

    /// Set the artwork URI
    #[must_use]
    pub fn with_artwork_uri(mut self, uri: impl Into<String>) -> Self {
        self.artwork_uri = uri.into();
        self
    }

    /// Identity comparison (ignores every field but `id`)
    pub fn is_same(&self, other: &Song) -> bool {
        self.id == other.id
    }
}
