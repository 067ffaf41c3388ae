//! Core types for playback coordination

use aria_core::{ArtistId, PlaybackContext, Song};
use serde::{Deserialize, Serialize};

/// Playback status of the current song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No song loaded
    Idle,

    /// Play requested, media not ready yet
    Loading,

    /// Song loaded but not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Read-only snapshot of the engine's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_song: Option<Song>,
    pub is_playing: bool,
    pub position_secs: f64,

    /// 0 until the media reports metadata
    pub duration_secs: f64,

    /// 0-100
    pub volume_percent: u8,
    pub muted: bool,
    pub context: Option<PlaybackContext>,

    /// Owning artist of the current song, kept alongside Carousel/Featured
    pub artist: Option<ArtistId>,
    pub status: PlaybackStatus,
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume, also restored when unmuting from zero (0-100, default: 70)
    pub initial_volume: u8,

    /// Seconds before the end at which a track counts as finished (default: 0.5)
    pub end_threshold_secs: f64,

    /// Traverse the owning artist instead of Carousel/Featured (default: false)
    pub reclassify_by_artist: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: 70,
            end_threshold_secs: 0.5,
            reclassify_by_artist: false,
        }
    }
}

/// Format seconds as `m:ss` for display
///
/// Negative or non-finite input formats as `0:00`.
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
