//! Aria Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Aria Player.
//!
//! This crate provides the foundational building blocks shared by the
//! storage, playback, and application crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Artist`, `Playlist`, `PlaybackContext`
//! - **Core Traits**: `KeyValueStore` (persistence), `PlaybackLibrary` (sequence resolution)
//! - **Error Handling**: Unified `AriaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{PlaybackContext, Playlist, PlaylistId, Song, SongId};
//!
//! let song = Song::new("1", "Blue Hour", "Nadia Vale", 212.0);
//! assert_eq!(song.id, SongId::new("1"));
//!
//! let playlist = Playlist::new(PlaylistId::new("1700000000000"), "Late night drive");
//! assert!(playlist.songs.is_empty());
//!
//! let ctx = PlaybackContext::Playlist(playlist.id.clone());
//! assert_eq!(ctx.kind(), "playlist");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AriaError, Result};
pub use storage::{KeyValueStore, FAVOURITES_KEY, PLAYLISTS_KEY};
pub use traits::PlaybackLibrary;

pub use types::{
    Artist, ArtistId, PlaybackContext, Playlist, PlaylistId, Song, SongId, PLAYLIST_NAME_MAX_CHARS,
};
