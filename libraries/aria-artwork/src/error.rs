use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading artwork
///
/// Cloneable so one failed fetch can be handed to every caller waiting on it.
#[derive(Debug, Clone, Error)]
pub enum ArtworkError {
    /// Nothing exists at the URI
    #[error("Artwork not found: {0}")]
    NotFound(String),

    /// URI cannot be mapped onto the fetcher's source
    #[error("Invalid artwork URI: {0}")]
    InvalidUri(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// Artwork too large
    #[error("Artwork too large: {0} bytes (max {1} bytes)")]
    TooLarge(usize, usize),

    /// Fetcher-specific failure
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

impl From<std::io::Error> for ArtworkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
