/// Player configuration
use crate::error::{PlayerError, Result};
use aria_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `ARIA_PLAYBACK__INITIAL_VOLUME=55`
pub const ENV_PREFIX: &str = "ARIA";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_artwork")]
    pub artwork: ArtworkSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory for the file-backed stores
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Keep favourites and playlists in memory only
    #[serde(default)]
    pub in_memory: bool,

    /// Catalog dataset to load; empty for the bundled one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtworkSettings {
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Static asset root artwork URIs are resolved against
    #[serde(default = "default_artwork_root")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl PlayerConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        // Nested keys use a double underscore: ARIA_STORAGE__DATA_DIR
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document, without environment overrides
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.initial_volume > 100 {
            return Err(PlayerError::Config(format!(
                "playback.initial_volume must be 0-100, got {}",
                self.playback.initial_volume
            )));
        }

        if !self.playback.end_threshold_secs.is_finite() || self.playback.end_threshold_secs < 0.0
        {
            return Err(PlayerError::Config(format!(
                "playback.end_threshold_secs must be a non-negative number, got {}",
                self.playback.end_threshold_secs
            )));
        }

        if self.artwork.cache_capacity == 0 {
            return Err(PlayerError::Config(
                "artwork.cache_capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Catalog path, treating an empty value as unset
    pub fn catalog_path(&self) -> Option<&Path> {
        self.storage
            .catalog_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
        in_memory: false,
        catalog_path: None,
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_artwork() -> ArtworkSettings {
    ArtworkSettings {
        cache_capacity: default_cache_capacity(),
        root: default_artwork_root(),
    }
}

fn default_cache_capacity() -> usize {
    200
}

fn default_artwork_root() -> PathBuf {
    PathBuf::from("./public")
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            storage: default_storage(),
            artwork: default_artwork(),
            logging: default_logging(),
        }
    }
}
