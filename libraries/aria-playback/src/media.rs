//! Media element boundary
//!
//! Abstracts the single audio element the engine drives. Implementations
//! report asynchronous completions back as [`MediaEvent`]s tagged with the
//! [`LoadId`] of the source they belong to.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation number issued per media load
///
/// Strictly increasing within one engine. An event whose id differs from
/// the engine's current one belongs to a superseded load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadId(u64);

impl LoadId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completion reported by the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEvent {
    /// Load the event was issued under
    pub load: LoadId,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(load: LoadId, kind: MediaEventKind) -> Self {
        Self { load, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEventKind {
    /// Duration became known
    MetadataLoaded { duration: f64 },

    /// Enough data buffered to start playback
    CanPlay,

    /// Periodic position report
    TimeUpdate { position: f64 },

    /// Playback reached the end of the source
    Ended,

    /// An asynchronous playback start was refused (e.g. autoplay policy)
    PlayRejected { reason: String },
}

/// Platform audio element
///
/// Calls are fire-and-forget; results arrive later as [`MediaEvent`]s.
/// Only [`MediaElement::play`] may fail synchronously. Elements that queue
/// their own events hand them over through [`MediaElement::take_events`].
pub trait MediaElement {
    /// Point the element at a new source, tagging its future events with `load`
    fn set_source(&mut self, uri: &str, load: LoadId);

    /// Begin loading the current source
    fn load(&mut self);

    /// Start or resume playback
    ///
    /// An asynchronous refusal is reported as [`MediaEventKind::PlayRejected`].
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, secs: f64);

    /// Duration in seconds, once metadata has loaded
    fn duration(&self) -> Option<f64>;

    /// Linear volume, 0.0 to 1.0
    fn set_volume(&mut self, volume: f32);

    /// Whether the current source can start playing without waiting
    fn is_ready(&self) -> bool;

    /// Events reported since the last call, oldest first
    ///
    /// Elements whose events are delivered straight to
    /// [`crate::PlaybackEngine::handle_media_event`] keep the empty default.
    fn take_events(&mut self) -> Vec<MediaEvent> {
        Vec::new()
    }
}
