//! Aria Player
//!
//! Wires the catalog, the persisted stores, the playback engine and the
//! artwork cache into one [`Player`], configured from TOML and `ARIA_*`
//! environment variables.
//!
//! # Example
//!
//! ```no_run
//! use aria_player::{init_tracing, Player, PlayerConfig};
//! # use aria_playback::MediaElement;
//! # fn media() -> Box<dyn MediaElement> { unimplemented!() }
//!
//! # fn main() -> aria_player::Result<()> {
//! let config = PlayerConfig::load(Some("aria.toml".as_ref()))?;
//! init_tracing(&config.logging)?;
//!
//! let mut player = Player::new(&config, media())?;
//! let first = player.library().catalog().list_all()[0].clone();
//! player.engine_mut().play(first, Some(aria_core::PlaybackContext::Carousel));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
mod player;

pub use config::{ArtworkSettings, LoggingSettings, PlayerConfig, StorageSettings};
pub use error::{PlayerError, Result};
pub use logging::init_tracing;
pub use player::Player;
