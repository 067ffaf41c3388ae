//! Playback engine - core coordination
//!
//! Owns the single media element, tracks the current song and context, and
//! reconciles asynchronous media completions with the caller's intent.

use crate::{
    events::{EventHub, PlaybackEvent, SubscriptionId},
    media::{LoadId, MediaElement, MediaEvent, MediaEventKind},
    types::{PlaybackConfig, PlaybackState, PlaybackStatus},
    volume::Volume,
};
use aria_core::{ArtistId, PlaybackContext, PlaybackLibrary, Song};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Playback coordination engine
///
/// Single-threaded: every operation and every [`MediaEvent`] is handled to
/// completion before the next one. Media completions are matched against
/// the current [`LoadId`] so a superseded load can never start playback.
pub struct PlaybackEngine {
    media: Box<dyn MediaElement>,
    library: Arc<dyn PlaybackLibrary>,
    config: PlaybackConfig,

    current_song: Option<Song>,
    context: Option<PlaybackContext>,

    /// Artist the current song was played under, if known
    artist: Option<ArtistId>,

    /// Caller intent; the media may not have started yet
    is_playing: bool,

    /// Current source reported `CanPlay`
    ready: bool,

    position: f64,
    duration: f64,

    /// Position to restore after a reload
    last_position: f64,

    volume: Volume,

    /// Load the engine currently accepts events for
    load: Option<LoadId>,
    last_load: LoadId,

    /// One-shot start, consumed by the matching `CanPlay`
    pending_play: Option<LoadId>,

    /// End detection fires once per arrival at the end of the track
    end_armed: bool,

    status: PlaybackStatus,
    events: EventHub,
}

impl PlaybackEngine {
    /// Create an idle engine driving `media`
    pub fn new(
        mut media: Box<dyn MediaElement>,
        library: Arc<dyn PlaybackLibrary>,
        config: PlaybackConfig,
    ) -> Self {
        let volume = Volume::new(config.initial_volume);
        media.set_volume(volume.gain());

        Self {
            media,
            library,
            config,
            current_song: None,
            context: None,
            artist: None,
            is_playing: false,
            ready: false,
            position: 0.0,
            duration: 0.0,
            last_position: 0.0,
            volume,
            load: None,
            last_load: LoadId::new(0),
            pending_play: None,
            end_armed: false,
            status: PlaybackStatus::Idle,
            events: EventHub::default(),
        }
    }

    // ===== Playback Control =====

    /// Play `song`, optionally switching the active context
    ///
    /// Playing the current song again only resumes it if paused; the
    /// position is kept and the context is left alone.
    pub fn play(&mut self, song: Song, context: Option<PlaybackContext>) {
        if self.current_song.as_ref().is_some_and(|s| s.is_same(&song)) {
            if !self.is_playing {
                self.resume();
            }
            return;
        }

        self.media.pause();
        let load = self.issue_load();

        let previous = self.current_song.replace(song.clone()).map(|s| s.id);
        self.is_playing = true;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_position = 0.0;

        info!("Playing {} ({}) under load {}", song.id, song.title, load);
        self.events.emit(PlaybackEvent::SongChanged {
            song: song.clone(),
            previous,
        });
        self.events
            .emit(PlaybackEvent::PositionChanged { position: 0.0 });
        self.events
            .emit(PlaybackEvent::DurationChanged { duration: 0.0 });

        if let Some(context) = context {
            self.apply_context(context, &song);
        }

        self.media.set_source(&song.audio_uri, load);
        self.media.load();
        self.pending_play = Some(load);
        debug!("Deferred play registered for load {}", load);

        self.sync_status();
    }

    /// Flip between playing and paused; no-op without a current song
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Pause the current song
    pub fn pause(&mut self) {
        if self.current_song.is_none() || !self.is_playing {
            return;
        }
        self.is_playing = false;
        self.media.pause();
        self.sync_status();
    }

    /// Resume the current song, deferring until the media can play
    pub fn resume(&mut self) {
        if self.current_song.is_none() || self.is_playing {
            return;
        }
        self.is_playing = true;

        if self.ready || self.media.is_ready() {
            self.ready = true;
            self.start_media();
        } else {
            self.pending_play = self.load;
            debug!("Media not ready, deferring play");
        }
        self.sync_status();
    }

    /// Seek to `secs`, clamped to the track
    ///
    /// Before metadata the song's catalog duration bounds the seek.
    pub fn seek(&mut self, secs: f64) {
        let Some(song) = &self.current_song else {
            return;
        };
        let max = if self.duration > 0.0 {
            self.duration
        } else {
            song.duration.max(0.0)
        };
        let target = if secs.is_finite() {
            secs.clamp(0.0, max)
        } else {
            0.0
        };

        self.position = target;
        self.last_position = target;
        self.media.set_current_time(target);
        if self.duration > 0.0 && target < self.duration - self.config.end_threshold_secs {
            self.end_armed = true;
        }
        self.events
            .emit(PlaybackEvent::PositionChanged { position: target });
    }

    /// Seek to a fraction (0.0 to 1.0) of the track
    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(song) = &self.current_song else {
            return;
        };
        let length = if self.duration > 0.0 {
            self.duration
        } else {
            song.duration
        };
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.seek(fraction * length);
    }

    /// Skip to the next song of the active context, wrapping around
    pub fn next(&mut self) {
        self.step(true);
    }

    /// Go back to the previous song of the active context, wrapping around
    pub fn previous(&mut self) {
        self.step(false);
    }

    /// Reload the current source, keeping the last position
    ///
    /// The position is restored once the new load reports its metadata.
    pub fn reload(&mut self) {
        let Some(song) = self.current_song.clone() else {
            return;
        };
        let keep = self.last_position;

        self.media.pause();
        let load = self.issue_load();
        self.duration = 0.0;
        self.last_position = keep;

        debug!("Reloading {} under load {} (resume at {:.1}s)", song.id, load, keep);
        self.media.set_source(&song.audio_uri, load);
        self.media.load();
        self.pending_play = Some(load);
        self.sync_status();
    }

    // ===== Volume Control =====

    /// Set volume (clamped to 0-100)
    pub fn set_volume(&mut self, percent: i32) {
        self.volume.set_level(percent);
        self.apply_volume();
    }

    /// Mute, or restore the volume from before muting
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Media Events =====

    /// Feed a completion from the media element into the engine
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if self.load != Some(event.load) {
            debug!(
                "Ignoring stale {:?} from load {} (current {:?})",
                event.kind, event.load, self.load
            );
            return;
        }

        match event.kind {
            MediaEventKind::MetadataLoaded { duration } => self.on_metadata(duration),
            MediaEventKind::CanPlay => self.on_can_play(event.load),
            MediaEventKind::TimeUpdate { position } => self.on_time_update(position),
            MediaEventKind::Ended => {
                if self.end_armed {
                    self.handle_track_end();
                }
            }
            MediaEventKind::PlayRejected { reason } => self.fail_start(&reason),
        }
    }

    /// Drain the media element's own event queue into the engine
    ///
    /// Returns how many events were taken. Events queued while handling the
    /// batch (e.g. after an automatic advance) wait for the next call.
    pub fn pump_media_events(&mut self) -> usize {
        let events = self.media.take_events();
        let count = events.len();
        for event in events {
            self.handle_media_event(event);
        }
        count
    }

    fn on_metadata(&mut self, duration: f64) {
        if !duration.is_finite() || duration < 0.0 {
            debug!("Ignoring unusable duration {}", duration);
            return;
        }
        self.duration = duration;
        self.events.emit(PlaybackEvent::DurationChanged { duration });

        if self.last_position > 0.0 && self.last_position < duration {
            let restore = self.last_position;
            debug!("Restoring position {:.1}s", restore);
            self.media.set_current_time(restore);
            self.position = restore;
            self.events
                .emit(PlaybackEvent::PositionChanged { position: restore });
        } else if self.position > duration {
            self.position = duration;
        }
    }

    fn on_can_play(&mut self, load: LoadId) {
        self.ready = true;
        if self.pending_play == Some(load) {
            self.pending_play = None;
            if self.is_playing {
                debug!("Running deferred play for load {}", load);
                self.start_media();
            }
        }
        self.sync_status();
    }

    fn on_time_update(&mut self, position: f64) {
        // Position tracking is suspended until the duration is known
        if self.duration <= 0.0 || !position.is_finite() {
            return;
        }
        let position = position.clamp(0.0, self.duration);
        self.position = position;
        self.last_position = position;
        self.events.emit(PlaybackEvent::PositionChanged { position });

        if position >= self.duration - self.config.end_threshold_secs {
            if self.end_armed {
                self.handle_track_end();
            }
        } else {
            self.end_armed = true;
        }
    }

    /// Natural end of the current track: rewind, stop, advance
    fn handle_track_end(&mut self) {
        self.end_armed = false;
        if let Some(song) = &self.current_song {
            debug!("Track {} ended", song.id);
        }

        self.media.pause();
        self.media.set_current_time(0.0);
        self.position = 0.0;
        self.last_position = 0.0;
        self.is_playing = false;
        self.events
            .emit(PlaybackEvent::PositionChanged { position: 0.0 });
        self.sync_status();

        self.next();
    }

    // ===== Subscriptions =====

    /// Register a listener for every future event
    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(Box::new(listener))
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Drain all pending events
    ///
    /// Returns every event emitted since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        self.events.has_pending()
    }

    // ===== Queries =====

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_song: self.current_song.clone(),
            is_playing: self.is_playing,
            position_secs: self.position,
            duration_secs: self.duration,
            volume_percent: self.volume.level(),
            muted: self.volume.is_muted(),
            context: self.context.clone(),
            artist: self.artist.clone(),
            status: self.status,
        }
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn context(&self) -> Option<&PlaybackContext> {
        self.context.as_ref()
    }

    /// Owning artist of the current song, as of the last context switch
    pub fn current_artist(&self) -> Option<&ArtistId> {
        self.artist.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Load id current media events must carry
    pub fn current_load(&self) -> Option<LoadId> {
        self.load
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Internals =====

    fn issue_load(&mut self) -> LoadId {
        let load = self.last_load.next();
        self.last_load = load;
        self.load = Some(load);
        self.ready = false;
        self.pending_play = None;
        self.end_armed = true;
        load
    }

    fn apply_context(&mut self, context: PlaybackContext, song: &Song) {
        self.artist = match &context {
            PlaybackContext::Artist(id) => Some(id.clone()),
            PlaybackContext::Carousel | PlaybackContext::Featured => {
                self.library.artist_for_song(&song.id)
            }
            PlaybackContext::Playlist(_) | PlaybackContext::Favourites => None,
        };

        let context = match (context, &self.artist) {
            (PlaybackContext::Carousel | PlaybackContext::Featured, Some(artist))
                if self.config.reclassify_by_artist =>
            {
                PlaybackContext::Artist(artist.clone())
            }
            (context, _) => context,
        };

        if self.context.as_ref() != Some(&context) {
            debug!("Context is now {}", context);
            self.context = Some(context);
            self.events.emit(PlaybackEvent::ContextChanged {
                context: self.context.clone(),
            });
        }
    }

    fn step(&mut self, forward: bool) {
        let (Some(song), Some(context)) = (&self.current_song, &self.context) else {
            return;
        };

        let sequence = self.library.resolve(context);
        let Some(index) = sequence.iter().position(|s| s.id == song.id) else {
            debug!("{} is not in {}, staying put", song.id, context);
            return;
        };

        let len = sequence.len();
        let target = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        debug!(
            "Resolved {} songs for {}, moving {} -> {}",
            len, context, index, target
        );

        let context = context.clone();
        let next = sequence[target].clone();
        self.play(next, Some(context));
    }

    fn start_media(&mut self) {
        if let Err(e) = self.media.play() {
            self.fail_start(&e.to_string());
        }
    }

    fn fail_start(&mut self, reason: &str) {
        let Some(song) = &self.current_song else {
            return;
        };
        warn!("Playback of {} failed to start: {}", song.id, reason);

        let song_id = song.id.clone();
        self.is_playing = false;
        self.pending_play = None;
        self.events.emit(PlaybackEvent::PlaybackFailed {
            song_id,
            reason: reason.to_string(),
        });
        self.sync_status();
    }

    fn apply_volume(&mut self) {
        self.media.set_volume(self.volume.gain());
        self.events.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn compute_status(&self) -> PlaybackStatus {
        match (&self.current_song, self.is_playing, self.ready) {
            (None, _, _) => PlaybackStatus::Idle,
            (Some(_), true, false) => PlaybackStatus::Loading,
            (Some(_), true, true) => PlaybackStatus::Playing,
            (Some(_), false, _) => PlaybackStatus::Paused,
        }
    }

    /// Emit `StateChanged` if the derived status moved
    fn sync_status(&mut self) {
        let status = self.compute_status();
        if status != self.status {
            self.status = status;
            self.events.emit(PlaybackEvent::StateChanged { status });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_core::{PlaylistId, SongId};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        plays: usize,
        pauses: usize,
        sources: Vec<(String, LoadId)>,
        time: f64,
        volume: f32,
    }

    struct Recorder(Rc<RefCell<Calls>>);

    impl MediaElement for Recorder {
        fn set_source(&mut self, uri: &str, load: LoadId) {
            self.0.borrow_mut().sources.push((uri.to_string(), load));
        }
        fn load(&mut self) {}
        fn play(&mut self) -> crate::Result<()> {
            self.0.borrow_mut().plays += 1;
            Ok(())
        }
        fn pause(&mut self) {
            self.0.borrow_mut().pauses += 1;
        }
        fn current_time(&self) -> f64 {
            self.0.borrow().time
        }
        fn set_current_time(&mut self, secs: f64) {
            self.0.borrow_mut().time = secs;
        }
        fn duration(&self) -> Option<f64> {
            None
        }
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().volume = volume;
        }
        fn is_ready(&self) -> bool {
            false
        }
    }

    struct Pair;

    impl PlaybackLibrary for Pair {
        fn catalog_songs(&self) -> Vec<Song> {
            vec![song("a"), song("b")]
        }
        fn featured_songs(&self) -> Vec<Song> {
            vec![song("b")]
        }
        fn artist_songs(&self, _id: &ArtistId) -> Vec<Song> {
            vec![song("a")]
        }
        fn artist_for_song(&self, id: &SongId) -> Option<ArtistId> {
            (id.as_str() == "a").then(|| ArtistId::new("x"))
        }
        fn playlist_songs(&self, _id: &PlaylistId) -> Vec<Song> {
            Vec::new()
        }
        fn favourite_songs(&self) -> Vec<Song> {
            Vec::new()
        }
    }

    fn song(id: &str) -> Song {
        Song::new(id, id.to_uppercase(), "X", 100.0).with_audio_uri(format!("/audio/{id}.mp3"))
    }

    fn engine() -> (PlaybackEngine, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let engine = PlaybackEngine::new(
            Box::new(Recorder(calls.clone())),
            Arc::new(Pair),
            PlaybackConfig::default(),
        );
        (engine, calls)
    }

    #[test]
    fn new_engine_is_idle_at_initial_volume() {
        let (engine, calls) = engine();
        assert_eq!(engine.status(), PlaybackStatus::Idle);
        assert_eq!(engine.volume(), 70);
        assert!((calls.borrow().volume - 0.7).abs() < f32::EPSILON);
        assert!(engine.current_load().is_none());
    }

    #[test]
    fn play_loads_source_and_waits_for_can_play() {
        let (mut engine, calls) = engine();
        engine.play(song("a"), None);

        assert_eq!(engine.status(), PlaybackStatus::Loading);
        assert_eq!(calls.borrow().plays, 0);
        let load = engine.current_load().unwrap();
        assert_eq!(calls.borrow().sources, vec![("/audio/a.mp3".to_string(), load)]);

        engine.handle_media_event(MediaEvent::new(load, MediaEventKind::CanPlay));
        assert_eq!(calls.borrow().plays, 1);
        assert_eq!(engine.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn carousel_keeps_context_and_records_owning_artist() {
        let (mut engine, _) = engine();
        engine.play(song("a"), Some(PlaybackContext::Carousel));
        assert_eq!(engine.context(), Some(&PlaybackContext::Carousel));
        assert_eq!(engine.current_artist(), Some(&ArtistId::new("x")));

        engine.play(song("b"), Some(PlaybackContext::Featured));
        assert_eq!(engine.context(), Some(&PlaybackContext::Featured));
        assert_eq!(engine.current_artist(), None);
    }

    #[test]
    fn reclassify_policy_switches_to_owning_artist() {
        let config = PlaybackConfig {
            reclassify_by_artist: true,
            ..PlaybackConfig::default()
        };
        let mut engine =
            PlaybackEngine::new(Box::new(Recorder(Rc::default())), Arc::new(Pair), config);
        engine.play(song("a"), Some(PlaybackContext::Carousel));
        assert_eq!(
            engine.context(),
            Some(&PlaybackContext::Artist(ArtistId::new("x")))
        );
    }

    #[test]
    fn play_without_context_keeps_previous_context() {
        let (mut engine, _) = engine();
        engine.play(song("b"), Some(PlaybackContext::Carousel));
        engine.play(song("a"), None);
        assert_eq!(engine.context(), Some(&PlaybackContext::Carousel));
    }

    #[test]
    fn operations_without_song_are_noops() {
        let (mut engine, calls) = engine();
        engine.toggle_play();
        engine.seek(10.0);
        engine.next();
        engine.previous();
        engine.reload();

        assert!(!engine.is_playing());
        assert_eq!(engine.position(), 0.0);
        assert!(calls.borrow().sources.is_empty());
        assert_eq!(engine.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn events_are_queued_in_order() {
        let (mut engine, _) = engine();
        engine.play(song("a"), None);
        let events = engine.drain_events();

        assert!(matches!(events[0], PlaybackEvent::SongChanged { .. }));
        assert_eq!(
            events.last(),
            Some(&PlaybackEvent::StateChanged {
                status: PlaybackStatus::Loading
            })
        );
        assert!(!engine.has_pending_events());
    }

    #[test]
    fn mute_round_trip_updates_media() {
        let (mut engine, calls) = engine();
        engine.set_volume(40);
        engine.toggle_mute();
        assert!(engine.is_muted());
        assert_eq!(calls.borrow().volume, 0.0);

        engine.toggle_mute();
        assert_eq!(engine.volume(), 40);
        assert!((calls.borrow().volume - 0.4).abs() < f32::EPSILON);
    }
}
