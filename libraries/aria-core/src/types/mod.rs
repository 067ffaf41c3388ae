mod artist;
mod context;
mod ids;
mod playlist;
mod song;

pub use artist::Artist;
pub use context::PlaybackContext;
pub use ids::{ArtistId, PlaylistId, SongId};
pub use playlist::{truncate_name, Playlist, PLAYLIST_NAME_MAX_CHARS};
pub use song::Song;
