//! WASM-compatible player session wrapper

use super::engine::{HtmlAudioEngine, JsAnimation, NavigatorMediaSession};
use crate::{
    Channel, HandleId, MediaAction, MuteState, NavAction, PlayState, PlaybackError, PlayerConfig,
    PlayerSession,
};
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Browser player
///
/// Wraps [`PlayerSession`] with a JavaScript-friendly API. Every call that
/// changes state forwards the resulting events to the `onEvent` callback.
///
/// Handle ids are returned to JavaScript so that the host can tag the
/// element's `loadedmetadata` and `progress` listeners:
///
/// ```js
/// const id = player.selectChannel("epic", false);
/// const audio = player.audioElement();
/// audio.addEventListener("loadedmetadata", () => player.onMetadataReady(id));
/// audio.addEventListener("progress", () => player.onBufferingProgress(id));
/// ```
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: PlayerSession<HtmlAudioEngine, JsAnimation>,

    // Event callbacks
    on_event: Option<Function>,
    on_error: Option<Function>,
}

fn handle_to_js(id: HandleId) -> u32 {
    u32::try_from(id.0).unwrap_or(u32::MAX)
}

fn parse_channel(channel: &str) -> Result<Channel, JsValue> {
    channel
        .parse()
        .map_err(|e: PlaybackError| JsValue::from_str(&e.to_string()))
}

fn number_field(details: &JsValue, name: &str) -> Option<f64> {
    Reflect::get(details, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_f64())
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player
    ///
    /// `config` is a `PlayerConfig` object (or `undefined` for defaults);
    /// `play_icon` and `mute_icon` are Lottie animation instances.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, play_icon: JsValue, mute_icon: JsValue) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        let inner = PlayerSession::new(
            config,
            HtmlAudioEngine,
            JsAnimation::new(play_icon),
            JsAnimation::new(mute_icon),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            inner,
            on_event: None,
            on_error: None,
        })
    }

    // ===== Transport =====

    /// Play/pause button
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
        self.flush_events();
    }

    /// Mute button
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.flush_events();
    }

    /// Volume slider input (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: u8) {
        self.inner.set_volume(level.min(100));
        self.flush_events();
    }

    /// Channel button: `secondary` is the context-menu action
    ///
    /// Returns the id of the new handle.
    #[wasm_bindgen(js_name = selectChannel)]
    pub fn select_channel(&mut self, channel: &str, secondary: bool) -> Result<u32, JsValue> {
        let channel = parse_channel(channel)?;
        let action = if secondary {
            NavAction::Retreat
        } else {
            NavAction::Advance
        };

        let result = self.inner.select_channel(channel, action);
        self.flush_events();
        result.map(handle_to_js).map_err(|e| self.handle_error(e))
    }

    /// System stop
    pub fn stop(&mut self) {
        self.inner.stop();
        self.flush_events();
    }

    // ===== Element notifications =====

    /// `loadedmetadata` fired for handle `id`
    #[wasm_bindgen(js_name = onMetadataReady)]
    pub fn on_metadata_ready(&mut self, id: u32) {
        self.inner.on_metadata_ready(HandleId(u64::from(id)));
        self.flush_events();
    }

    /// `progress` fired for handle `id`
    #[wasm_bindgen(js_name = onBufferingProgress)]
    pub fn on_buffering_progress(&mut self, id: u32) {
        self.inner.on_buffering_progress(HandleId(u64::from(id)));
        self.flush_events();
    }

    /// Call from `requestAnimationFrame`
    #[wasm_bindgen(js_name = onFrame)]
    pub fn on_frame(&mut self) {
        self.inner.on_frame();
        self.flush_events();
    }

    // ===== Seeking =====

    /// Seek slider `input`
    #[wasm_bindgen(js_name = beginSeekInput)]
    pub fn begin_seek_input(&mut self, value: f64) {
        self.inner.begin_seek_input(value);
        self.flush_events();
    }

    /// Seek slider `change`
    #[wasm_bindgen(js_name = commitSeek)]
    pub fn commit_seek(&mut self, value: f64) {
        self.inner.commit_seek(value);
        self.flush_events();
    }

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, position_secs: f64) -> Result<(), JsValue> {
        let result = self.inner.seek_to(position_secs, false);
        self.flush_events();
        result.map_err(|e| self.handle_error(e))
    }

    // ===== System media control =====

    /// Register with `navigator.mediaSession`
    ///
    /// `dispatch(action, details)` is called for every system command and
    /// should forward to [`handleMediaAction`](Self::handle_media_action).
    /// Returns false when the browser has no media session.
    #[wasm_bindgen(js_name = installMediaSession)]
    pub fn install_media_session(&mut self, dispatch: Function) -> bool {
        let mut control = NavigatorMediaSession::new(dispatch);
        self.inner.install_media_session(&mut control).is_active()
    }

    /// Forward a media session action (`"play"`, `"seekto"`, ...)
    #[wasm_bindgen(js_name = handleMediaAction)]
    pub fn handle_media_action(&mut self, action: &str, details: JsValue) -> Result<(), JsValue> {
        let action = match action {
            "play" => MediaAction::Play,
            "pause" => MediaAction::Pause,
            "seekbackward" => MediaAction::SeekBackward {
                offset: number_field(&details, "seekOffset"),
            },
            "seekforward" => MediaAction::SeekForward {
                offset: number_field(&details, "seekOffset"),
            },
            "seekto" => MediaAction::SeekTo {
                time: number_field(&details, "seekTime").unwrap_or(0.0),
                fast: Reflect::get(&details, &JsValue::from_str("fastSeek"))
                    .ok()
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
            },
            "stop" => MediaAction::Stop,
            other => return Err(JsValue::from_str(&format!("Unknown media action '{}'", other))),
        };

        self.inner.handle_media_action(action);
        self.flush_events();
        Ok(())
    }

    // ===== Hover =====

    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&mut self, channel: &str) -> Result<(), JsValue> {
        self.inner.pointer_enter(parse_channel(channel)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self, channel: &str) -> Result<(), JsValue> {
        self.inner.pointer_leave(parse_channel(channel)?);
        Ok(())
    }

    // ===== State Queries =====

    /// "playing" | "paused"
    #[wasm_bindgen(js_name = getPlayState)]
    pub fn get_play_state(&self) -> String {
        match self.inner.play_state() {
            PlayState::Playing => "playing".to_string(),
            PlayState::Paused => "paused".to_string(),
        }
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.inner.mute_state() == MuteState::Muted
    }

    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> u8 {
        self.inner.volume()
    }

    /// Id of the live handle, if any
    #[wasm_bindgen(js_name = activeHandle)]
    pub fn active_handle(&self) -> Option<u32> {
        self.inner.active_handle().map(handle_to_js)
    }

    /// Element of the live handle, if any
    #[wasm_bindgen(js_name = audioElement)]
    pub fn audio_element(&self) -> Option<HtmlAudioElement> {
        self.inner.active_media().map(|h| h.element().clone())
    }

    /// Full view-model (`PlayerDisplay`) as a plain object
    pub fn display(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.display()).unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register the event callback; receives one `PlayerEvent` object per call
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();
        if let Some(ref cb) = self.on_event {
            for event in events {
                if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                    cb.call1(&JsValue::NULL, &js_event).ok();
                }
            }
        }
    }

    fn handle_error(&self, error: PlaybackError) -> JsValue {
        let err_msg = error.to_string();

        if let Some(ref cb) = self.on_error {
            cb.call1(&JsValue::NULL, &JsValue::from_str(&err_msg)).ok();
        }

        JsValue::from_str(&err_msg)
    }
}
