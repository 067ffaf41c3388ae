//! Playback Events
//!
//! Event-based communication for UI synchronization. Every event is both
//! delivered to subscribers and queued for [`crate::PlaybackEngine::drain_events`].

use crate::types::PlaybackStatus;
use aria_core::{PlaybackContext, Song, SongId};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Status changed (idle, loading, paused, playing)
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A different song became current
    SongChanged {
        song: Song,
        previous: Option<SongId>,
    },

    /// Position moved (playback progress, seek, rewind)
    PositionChanged {
        /// Seconds from the start
        position: f64,
    },

    /// Duration became known for the current song
    DurationChanged { duration: f64 },

    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Active context replaced by a play-with-context action
    ContextChanged { context: Option<PlaybackContext> },

    /// Starting playback failed; the song falls back to paused
    PlaybackFailed { song_id: SongId, reason: String },
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Listener = Box<dyn FnMut(&PlaybackEvent)>;

/// Subscriber list plus the drainable event queue
#[derive(Default)]
pub(crate) struct EventHub {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    pending: Vec<PlaybackEvent>,
}

impl EventHub {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&mut self, event: PlaybackEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        self.pending.push(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
