/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key cannot be mapped onto the backend
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend rejected the operation
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for aria_core::AriaError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => aria_core::AriaError::Io(e),
            other => aria_core::AriaError::storage(other.to_string()),
        }
    }
}
