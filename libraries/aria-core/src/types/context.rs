//! Playback context: which ordered list `next`/`previous` traverse

use super::ids::{ArtistId, PlaylistId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a play request
///
/// The context is evaluated into a concrete song sequence every time the
/// engine advances, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum PlaybackContext {
    /// Home carousel; traverses the full catalog
    Carousel,

    /// One artist's songs
    Artist(ArtistId),

    /// Curated featured list
    Featured,

    /// A user playlist
    Playlist(PlaylistId),

    /// The favourites set
    Favourites,
}

impl PlaybackContext {
    /// Short tag for logs and serialization
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::Artist(_) => "artist",
            Self::Featured => "featured",
            Self::Playlist(_) => "playlist",
            Self::Favourites => "favourites",
        }
    }

    /// Artist id, if this is an artist context
    pub fn artist_id(&self) -> Option<&ArtistId> {
        match self {
            Self::Artist(id) => Some(id),
            _ => None,
        }
    }

    /// Playlist id, if this is a playlist context
    pub fn playlist_id(&self) -> Option<&PlaylistId> {
        match self {
            Self::Playlist(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for PlaybackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artist(id) => write!(f, "artist:{}", id),
            Self::Playlist(id) => write!(f, "playlist:{}", id),
            other => f.write_str(other.kind()),
        }
    }
}
