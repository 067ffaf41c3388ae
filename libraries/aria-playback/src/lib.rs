//! Aria Player - Playback Coordination
//!
//! Drives exactly one media element and keeps playback state consistent
//! while loads, plays and pauses complete asynchronously.
//!
//! This crate provides:
//! - Play / pause / toggle with deferred start until the media can play
//! - Context-aware next / previous with wraparound
//! - Seeking (seconds and fraction), clamped to the track
//! - Volume control (0-100%, mute with last-volume memory)
//! - End-of-track detection that advances through the active context
//! - Event subscription for UI synchronization
//!
//! # Architecture
//!
//! The engine never touches a browser API directly:
//! - Media access goes through the [`MediaElement`] trait
//! - Sequences are resolved through [`aria_core::PlaybackLibrary`]
//! - Media completions are fed back as [`MediaEvent`]s tagged with the
//!   [`LoadId`] they were issued under; events from superseded loads are
//!   ignored
//!
//! With the `web` feature, [`web::HtmlAudioMedia`] implements
//! [`MediaElement`] over an `HTMLAudioElement`.
//!
//! # Example
//!
//! ```rust
//! use aria_core::{ArtistId, PlaybackContext, PlaybackLibrary, PlaylistId, Song, SongId};
//! use aria_playback::{LoadId, MediaElement, PlaybackConfig, PlaybackEngine, Result};
//! use std::sync::Arc;
//!
//! struct Silent;
//!
//! impl MediaElement for Silent {
//!     fn set_source(&mut self, _uri: &str, _load: LoadId) {}
//!     fn load(&mut self) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, _secs: f64) {}
//!     fn duration(&self) -> Option<f64> { None }
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn is_ready(&self) -> bool { false }
//! }
//!
//! struct OneSong;
//!
//! impl PlaybackLibrary for OneSong {
//!     fn catalog_songs(&self) -> Vec<Song> { vec![Song::new("1", "Intro", "Someone", 90.0)] }
//!     fn featured_songs(&self) -> Vec<Song> { Vec::new() }
//!     fn artist_songs(&self, _id: &ArtistId) -> Vec<Song> { Vec::new() }
//!     fn artist_for_song(&self, _id: &SongId) -> Option<ArtistId> { None }
//!     fn playlist_songs(&self, _id: &PlaylistId) -> Vec<Song> { Vec::new() }
//!     fn favourite_songs(&self) -> Vec<Song> { Vec::new() }
//! }
//!
//! let library = Arc::new(OneSong);
//! let mut engine = PlaybackEngine::new(Box::new(Silent), library.clone(), PlaybackConfig::default());
//!
//! let song = library.catalog_songs()[0].clone();
//! engine.play(song, Some(PlaybackContext::Carousel));
//! assert!(engine.is_playing());
//!
//! engine.set_volume(150);
//! assert_eq!(engine.volume(), 100);
//! ```

mod engine;
mod error;
mod events;
mod media;
pub mod types;
mod volume;

#[cfg(feature = "web")]
pub mod web;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, SubscriptionId};
pub use media::{LoadId, MediaElement, MediaEvent, MediaEventKind};
pub use types::{format_time, PlaybackConfig, PlaybackState, PlaybackStatus};
pub use volume::Volume;
