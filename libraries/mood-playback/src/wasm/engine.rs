//! Browser implementations of the engine, animation and media-session seams

use crate::{
    AnimationPlayer, AudioEngine, MediaActionKind, MediaHandle, MediaMetadata, PlaybackError,
    Result, Segment, SystemMediaControl, TrackRef,
};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAudioElement;

/// `HTMLMediaElement.HAVE_METADATA`
const HAVE_METADATA: u16 = 1;

fn js_error(context: &str, err: &JsValue) -> PlaybackError {
    PlaybackError::Engine(format!("{context}: {err:?}"))
}

/// Look up `target[name]` as a function
fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
}

/// Creates one `HTMLAudioElement` per track
#[derive(Debug, Default)]
pub struct HtmlAudioEngine;

impl AudioEngine for HtmlAudioEngine {
    type Handle = HtmlAudioHandle;

    fn open(&mut self, track: &TrackRef) -> Result<HtmlAudioHandle> {
        let element = HtmlAudioElement::new_with_src(track.as_str())
            .map_err(|e| js_error("Failed to create audio element", &e))?;
        element.set_preload("auto");
        Ok(HtmlAudioHandle { element })
    }
}

/// Active Track Handle backed by an audio element
pub struct HtmlAudioHandle {
    element: HtmlAudioElement,
}

impl HtmlAudioHandle {
    /// The element, for wiring `loadedmetadata` and `progress` listeners
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl MediaHandle for HtmlAudioHandle {
    fn load(&mut self) {
        self.element.load();
    }

    fn play(&mut self) -> Result<()> {
        // The returned promise rejects on autoplay policy; the browser logs it.
        self.element
            .play()
            .map(|_| ())
            .map_err(|e| js_error("play() rejected", &e))
    }

    fn pause(&mut self) {
        self.element.pause().ok();
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn set_position(&mut self, secs: f64) {
        self.element.set_current_time(secs);
    }

    fn supports_fast_seek(&self) -> bool {
        method(self.element.as_ref(), "fastSeek").is_some()
    }

    fn fast_seek(&mut self, secs: f64) {
        if self.element.fast_seek(secs).is_err() {
            self.element.set_current_time(secs);
        }
    }

    fn set_volume(&mut self, gain: f64) {
        self.element.set_volume(gain);
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn is_muted(&self) -> bool {
        self.element.muted()
    }

    fn metadata_ready(&self) -> bool {
        self.element.ready_state() >= HAVE_METADATA
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn buffered_end(&self) -> Option<f64> {
        let ranges = self.element.buffered();
        match ranges.length() {
            0 => None,
            n => ranges.end(n - 1).ok(),
        }
    }
}

/// Drives a Lottie-style animation object
/// (`playSegments([from, to], force)`, `goToAndStop(frame, isFrame)`)
pub struct JsAnimation {
    target: JsValue,
}

impl JsAnimation {
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn call(&self, name: &str, args: &Array) {
        match method(&self.target, name) {
            Some(f) => {
                f.apply(&self.target, args).ok();
            }
            None => tracing::debug!("Animation object has no '{}' method", name),
        }
    }
}

impl AnimationPlayer for JsAnimation {
    fn play_segment(&mut self, segment: Segment) {
        let range = Array::of2(&segment.from.into(), &segment.to.into());
        self.call("playSegments", &Array::of2(&range, &JsValue::TRUE));
    }

    fn jump_to(&mut self, frame: u32) {
        self.call("goToAndStop", &Array::of2(&frame.into(), &JsValue::TRUE));
    }
}

/// `navigator.mediaSession`, dispatching every action to one JS function
///
/// Registered handlers call `dispatch(actionName, details)`.
pub struct NavigatorMediaSession {
    session: JsValue,
    dispatch: Function,
}

impl NavigatorMediaSession {
    pub fn new(dispatch: Function) -> Self {
        let session = Reflect::get(&js_sys::global(), &JsValue::from_str("navigator"))
            .and_then(|nav| Reflect::get(&nav, &JsValue::from_str("mediaSession")))
            .unwrap_or(JsValue::UNDEFINED);
        Self { session, dispatch }
    }
}

impl SystemMediaControl for NavigatorMediaSession {
    fn is_supported(&self) -> bool {
        !self.session.is_undefined() && !self.session.is_null()
    }

    fn set_metadata(&mut self, metadata: &MediaMetadata) {
        let Some(ctor) = method(&js_sys::global(), "MediaMetadata") else {
            return;
        };
        let Ok(init) = serde_wasm_bindgen::to_value(metadata) else {
            return;
        };
        if let Ok(value) = Reflect::construct(&ctor, &Array::of1(&init)) {
            Reflect::set(&self.session, &JsValue::from_str("metadata"), &value).ok();
        }
    }

    fn register(&mut self, action: MediaActionKind) -> bool {
        let Some(set_handler) = method(&self.session, "setActionHandler") else {
            return false;
        };
        let name = JsValue::from_str(action.as_str());
        let handler = self.dispatch.bind1(&JsValue::NULL, &name);

        // Browsers throw for actions they do not know.
        set_handler.call2(&self.session, &name, &handler).is_ok()
    }
}
