//! Browser media element
//!
//! [`HtmlAudioMedia`] drives an `HTMLAudioElement`. DOM listeners and the
//! play-promise rejection push [`MediaEvent`]s into a shared queue. The
//! engine drains it through [`crate::PlaybackEngine::pump_media_events`],
//! which the page calls from its frame or timer loop.

use crate::{
    error::{PlaybackError, Result},
    media::{LoadId, MediaElement, MediaEvent, MediaEventKind},
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use tracing::debug;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// `readyState` at which playback can start (HAVE_CURRENT_DATA)
const HAVE_CURRENT_DATA: u16 = 2;

#[derive(Default)]
struct Shared {
    load: Option<LoadId>,
    queue: VecDeque<MediaEvent>,
}

impl Shared {
    fn push(&mut self, kind: MediaEventKind) {
        if let Some(load) = self.load {
            self.queue.push_back(MediaEvent::new(load, kind));
        }
    }
}

type Listener = Closure<dyn FnMut()>;

/// `HTMLAudioElement` adapter
pub struct HtmlAudioMedia {
    audio: HtmlAudioElement,
    shared: Rc<RefCell<Shared>>,
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlAudioMedia {
    /// Create a detached audio element and wire its listeners
    pub fn new() -> Result<Self> {
        let audio = HtmlAudioElement::new()
            .map_err(|e| PlaybackError::media(format!("Cannot create audio element: {e:?}")))?;
        Self::attach(audio)
    }

    /// Wrap an existing element (e.g. one already in the document)
    pub fn attach(audio: HtmlAudioElement) -> Result<Self> {
        let mut media = Self {
            audio,
            shared: Rc::new(RefCell::new(Shared::default())),
            listeners: Vec::new(),
        };

        let audio = media.audio.clone();
        media.listen("loadedmetadata", move |shared| {
            shared.push(MediaEventKind::MetadataLoaded {
                duration: audio.duration(),
            });
        })?;
        media.listen("canplay", |shared| shared.push(MediaEventKind::CanPlay))?;
        let audio = media.audio.clone();
        media.listen("timeupdate", move |shared| {
            shared.push(MediaEventKind::TimeUpdate {
                position: audio.current_time(),
            });
        })?;
        media.listen("ended", |shared| shared.push(MediaEventKind::Ended))?;

        Ok(media)
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    fn listen(
        &mut self,
        event: &'static str,
        mut handler: impl FnMut(&mut Shared) + 'static,
    ) -> Result<()> {
        let shared = self.shared.clone();
        let callback: Listener = Closure::wrap(Box::new(move || {
            handler(&mut shared.borrow_mut());
        }) as Box<dyn FnMut()>);

        self.audio
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| PlaybackError::media(format!("Cannot listen for {event}: {e:?}")))?;
        self.listeners.push((event, callback));
        Ok(())
    }
}

impl MediaElement for HtmlAudioMedia {
    fn set_source(&mut self, uri: &str, load: LoadId) {
        let mut shared = self.shared.borrow_mut();
        shared.load = Some(load);
        shared.queue.clear();
        drop(shared);
        self.audio.set_src(uri);
    }

    fn load(&mut self) {
        self.audio.load();
    }

    fn play(&mut self) -> Result<()> {
        let promise: js_sys::Promise = self
            .audio
            .play()
            .map_err(|e| PlaybackError::media(format!("{e:?}")))?;

        let shared = self.shared.clone();
        let load = shared.borrow().load;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let mut shared = shared.borrow_mut();
                if shared.load == load {
                    shared.push(MediaEventKind::PlayRejected {
                        reason: format!("{e:?}"),
                    });
                }
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        // pause() only throws for detached elements
        if let Err(e) = self.audio.pause() {
            debug!("Ignoring pause failure: {:?}", e);
        }
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, secs: f64) {
        self.audio.set_current_time(secs);
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.audio.duration();
        duration.is_finite().then_some(duration)
    }

    fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(f64::from(volume.clamp(0.0, 1.0)));
    }

    fn is_ready(&self) -> bool {
        self.audio.ready_state() >= HAVE_CURRENT_DATA
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        self.shared.borrow_mut().queue.drain(..).collect()
    }
}

impl Drop for HtmlAudioMedia {
    fn drop(&mut self) {
        if let Err(e) = self.audio.pause() {
            debug!("Ignoring pause failure on drop: {:?}", e);
        }
        for (event, callback) in self.listeners.drain(..) {
            if let Err(e) = self
                .audio
                .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            {
                debug!("Cannot remove {} listener: {:?}", event, e);
            }
        }
    }
}
