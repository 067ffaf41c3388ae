/// Core traits for Aria Player
use crate::types::{ArtistId, PlaybackContext, PlaylistId, Song, SongId};

/// Read access to every ordered song sequence the player can traverse
///
/// The playback engine never owns the catalog or the persisted stores. It
/// resolves the active context through this trait each time it needs a
/// sequence, so changes made to favourites or playlists between calls are
/// always visible.
pub trait PlaybackLibrary {
    /// Full catalog in catalog order
    fn catalog_songs(&self) -> Vec<Song>;

    /// Curated featured subset
    fn featured_songs(&self) -> Vec<Song>;

    /// Songs of one artist, empty for an unknown artist
    fn artist_songs(&self, id: &ArtistId) -> Vec<Song>;

    /// Reverse lookup: the first artist whose song list contains `id`
    fn artist_for_song(&self, id: &SongId) -> Option<ArtistId>;

    /// Songs of one playlist, empty for an unknown playlist
    fn playlist_songs(&self, id: &PlaylistId) -> Vec<Song>;

    /// Current favourites snapshot in insertion order
    fn favourite_songs(&self) -> Vec<Song>;

    /// Evaluate a context into its resolved sequence
    fn resolve(&self, context: &PlaybackContext) -> Vec<Song> {
        match context {
            PlaybackContext::Carousel => self.catalog_songs(),
            PlaybackContext::Artist(id) => self.artist_songs(id),
            PlaybackContext::Featured => self.featured_songs(),
            PlaybackContext::Playlist(id) => self.playlist_songs(id),
            PlaybackContext::Favourites => self.favourite_songs(),
        }
    }
}
