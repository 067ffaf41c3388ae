use crate::error::{ArtworkError, Result};
use crate::types::ArtworkData;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Maximum artwork size (5MB)
const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Source of image bytes for an artwork URI
#[async_trait]
pub trait ArtworkFetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<ArtworkData>;
}

/// Reads artwork from a static asset directory
///
/// The URI is interpreted as a path relative to `root`
/// (`/images/a.jpg` -> `<root>/images/a.jpg`).
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, uri: &str) -> Result<PathBuf> {
        let relative = Path::new(uri.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if uri.trim().is_empty() || escapes {
            return Err(ArtworkError::InvalidUri(uri.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtworkFetcher for FsFetcher {
    async fn fetch(&self, uri: &str) -> Result<ArtworkData> {
        let path = self.resolve(uri)?;

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ArtworkError::NotFound(uri.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if data.len() > MAX_ARTWORK_SIZE {
            return Err(ArtworkError::TooLarge(data.len(), MAX_ARTWORK_SIZE));
        }

        Ok(ArtworkData::new(data, mime_type_for(&path)))
    }
}

/// Guess the MIME type from a file extension
fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
