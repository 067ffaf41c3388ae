//! Artist types

use super::ids::{ArtistId, SongId};
use super::song::Song;
use serde::{Deserialize, Serialize};

/// An artist from the static catalog
///
/// `songs` is not part of the dataset: the catalog fills it at load time with
/// every song whose `artist` field equals `name` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color_light: Option<String>,
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Artist {
    /// Whether this artist's song list contains `id`
    pub fn has_song(&self, id: &SongId) -> bool {
        self.songs.iter().any(|s| &s.id == id)
    }
}
