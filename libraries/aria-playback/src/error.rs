//! Error types for playback coordination

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Media element refused or failed an operation
    #[error("Media error: {0}")]
    Media(String),

    /// Operation needs a current song
    #[error("No song loaded")]
    NoSongLoaded,
}

impl PlaybackError {
    /// Create a media error
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }
}

impl From<PlaybackError> for aria_core::AriaError {
    fn from(err: PlaybackError) -> Self {
        aria_core::AriaError::media(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
