//! WASM bindings for mood-playback
//!
//! Runs the player session in the browser: tracks play through an
//! `HTMLAudioElement`, icons are driven through Lottie-style animation
//! objects, `navigator.mediaSession` receives metadata and commands, and
//! the window drag and slot swap state is exposed for the page's handlers.

#[cfg(feature = "wasm")]
pub mod drag;

#[cfg(feature = "wasm")]
pub mod engine;

#[cfg(feature = "wasm")]
pub mod player;

#[cfg(feature = "wasm")]
pub use drag::{WasmDragSurface, WasmSwapBoard};

#[cfg(feature = "wasm")]
pub use engine::{HtmlAudioEngine, HtmlAudioHandle, JsAnimation, NavigatorMediaSession};

#[cfg(feature = "wasm")]
pub use player::WasmPlayer;
