//! Shared test helpers: a scriptable media element and library builders

#![allow(dead_code)]

use aria_core::{Artist, ArtistId, Song};
use aria_playback::{
    LoadId, MediaElement, MediaEvent, MediaEventKind, PlaybackConfig, PlaybackEngine,
    PlaybackError,
};
use aria_storage::{Catalog, Library, MemoryStore};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

/// Everything the fake media element has been asked to do
#[derive(Debug, Default)]
pub struct FakeState {
    pub sources: Vec<(String, LoadId)>,
    pub loads: usize,
    pub plays: usize,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub time: f64,
    pub volume: f32,
    pub ready: bool,
    pub reject_play: bool,

    /// Events waiting for `take_events`
    pub queue: VecDeque<MediaEvent>,
}

/// Media element that records calls and only reports what a test queues
pub struct FakeMedia(Rc<RefCell<FakeState>>);

impl MediaElement for FakeMedia {
    fn set_source(&mut self, uri: &str, load: LoadId) {
        let mut state = self.0.borrow_mut();
        state.sources.push((uri.to_string(), load));
        state.ready = false;
        state.time = 0.0;
    }

    fn load(&mut self) {
        self.0.borrow_mut().loads += 1;
    }

    fn play(&mut self) -> aria_playback::Result<()> {
        let mut state = self.0.borrow_mut();
        state.plays += 1;
        if state.reject_play {
            return Err(PlaybackError::media("NotAllowedError"));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().pauses += 1;
    }

    fn current_time(&self) -> f64 {
        self.0.borrow().time
    }

    fn set_current_time(&mut self, secs: f64) {
        let mut state = self.0.borrow_mut();
        state.time = secs;
        state.seeks.push(secs);
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().volume = volume;
    }

    fn is_ready(&self) -> bool {
        self.0.borrow().ready
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        self.0.borrow_mut().queue.drain(..).collect()
    }
}

/// Engine plus a handle on its fake media
pub struct Harness {
    pub engine: PlaybackEngine,
    pub media: Rc<RefCell<FakeState>>,
}

impl Harness {
    pub fn new(library: Arc<Library>, config: PlaybackConfig) -> Self {
        let media = Rc::new(RefCell::new(FakeState::default()));
        let engine = PlaybackEngine::new(Box::new(FakeMedia(media.clone())), library, config);
        Self { engine, media }
    }

    pub fn load(&self) -> LoadId {
        self.engine.current_load().expect("a song is loaded")
    }

    pub fn send(&mut self, load: LoadId, kind: MediaEventKind) {
        self.engine.handle_media_event(MediaEvent::new(load, kind));
    }

    /// Media became playable for the current load
    pub fn can_play(&mut self) {
        self.media.borrow_mut().ready = true;
        let load = self.load();
        self.send(load, MediaEventKind::CanPlay);
    }

    pub fn metadata(&mut self, duration: f64) {
        let load = self.load();
        self.send(load, MediaEventKind::MetadataLoaded { duration });
    }

    pub fn time(&mut self, position: f64) {
        let load = self.load();
        self.send(load, MediaEventKind::TimeUpdate { position });
    }

    pub fn ended(&mut self) {
        let load = self.load();
        self.send(load, MediaEventKind::Ended);
    }

    /// Queue an event on the media for the current load without delivering it
    pub fn queue(&mut self, kind: MediaEventKind) {
        let load = self.load();
        self.media
            .borrow_mut()
            .queue
            .push_back(MediaEvent::new(load, kind));
    }

    /// Full load cycle: metadata then can-play
    pub fn ready(&mut self, duration: f64) {
        self.metadata(duration);
        self.can_play();
    }

    pub fn plays(&self) -> usize {
        self.media.borrow().plays
    }

    pub fn current_id(&self) -> Option<String> {
        self.engine
            .current_song()
            .map(|s| s.id.as_str().to_string())
    }
}

pub fn song(id: &str, artist: &str) -> Song {
    Song::new(id, format!("Song {id}"), artist, 180.0).with_audio_uri(format!("/audio/{id}.mp3"))
}

pub fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: ArtistId::new(id),
        name: name.to_string(),
        photo: String::new(),
        description: None,
        bg_color: None,
        bg_color_light: None,
        songs: Vec::new(),
    }
}

/// Library over `songs` with no artists and everything featured
pub fn library_of(songs: Vec<Song>) -> Arc<Library> {
    let catalog = Catalog::new(songs.clone(), songs, Vec::new());
    Arc::new(Library::open(catalog, Arc::new(MemoryStore::new())))
}

pub fn library_with_artists(songs: Vec<Song>, artists: Vec<Artist>) -> Arc<Library> {
    let catalog = Catalog::new(songs.clone(), songs, artists);
    Arc::new(Library::open(catalog, Arc::new(MemoryStore::new())))
}

/// Catalog `[A, B, C]` by three distinct unlisted artists
pub fn abc() -> Vec<Song> {
    vec![song("A", "One"), song("B", "Two"), song("C", "Three")]
}
