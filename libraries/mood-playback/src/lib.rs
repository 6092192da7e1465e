//! Mood Player - Playback Core
//!
//! Platform-agnostic playlist cycling and transport state for Mood Player.
//!
//! This crate provides:
//! - Three channels (epic, reflex, cool), each bound to a fixed playlist
//! - Bidirectional cyclic navigation with direction memory
//! - Play/pause and mute transport with icon animation segments
//! - Single-handle media lifecycle (stop, discard, create on every switch)
//! - Seek bar, buffered bar and `M:SS` time display
//! - System media control integration (play, pause, seek, stop)
//! - Draggable window offset and drop-to-swap slots
//!
//! # Architecture
//!
//! `mood-playback` owns no audio device and no UI:
//! - Media loading and output go through [`AudioEngine`] / [`MediaHandle`]
//! - Icon rendering goes through [`AnimationPlayer`]
//! - The platform media session goes through [`SystemMediaControl`]
//! - Hosts drain [`PlayerEvent`]s to update their view
//!
//! The browser build (feature `wasm`) backs these with an HTML audio
//! element and JavaScript callbacks.
//!
//! # Example: Channel Navigation
//!
//! ```rust
//! use mood_playback::{Playlist, PlaylistCursor, TrackRef};
//!
//! let playlist = Playlist::new(
//!     "epic",
//!     vec![TrackRef::new("a.mp3"), TrackRef::new("b.mp3"), TrackRef::new("c.mp3")],
//! )
//! .unwrap();
//!
//! let mut cursor = PlaylistCursor::new();
//! assert_eq!(cursor.advance(&playlist).as_str(), "b.mp3");
//! assert_eq!(cursor.advance(&playlist).as_str(), "c.mp3");
//! // Reversal lands on the neighbour, not two steps back
//! assert_eq!(cursor.retreat(&playlist).as_str(), "b.mp3");
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use mood_playback::{
//!     AudioEngine, Channel, MediaHandle, NavAction, NoAnimation, PlayerConfig, PlayerSession,
//!     Result, TrackRef,
//! };
//!
//! struct MyEngine;
//! struct MyHandle;
//!
//! impl AudioEngine for MyEngine {
//!     type Handle = MyHandle;
//!
//!     fn open(&mut self, _track: &TrackRef) -> Result<MyHandle> {
//!         Ok(MyHandle)
//!     }
//! }
//!
//! impl MediaHandle for MyHandle {
//!     fn load(&mut self) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn is_paused(&self) -> bool { true }
//!     fn position(&self) -> f64 { 0.0 }
//!     fn set_position(&mut self, _secs: f64) {}
//!     fn set_volume(&mut self, _gain: f64) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//!     fn is_muted(&self) -> bool { false }
//!     fn metadata_ready(&self) -> bool { false }
//!     fn duration(&self) -> f64 { 0.0 }
//!     fn buffered_end(&self) -> Option<f64> { None }
//! }
//!
//! let mut session =
//!     PlayerSession::new(PlayerConfig::default(), MyEngine, NoAnimation, NoAnimation).unwrap();
//!
//! // Click on the "epic" button
//! let handle = session.select_channel(Channel::Epic, NavAction::Advance).unwrap();
//!
//! // Later, from the platform's "metadata loaded" callback
//! session.on_metadata_ready(handle);
//!
//! // Once per display refresh
//! session.on_frame();
//! for event in session.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

mod animation;
mod cursor;
mod drag;
mod engine;
mod error;
mod events;
mod media_session;
mod progress;
mod selector;
mod session;
mod time;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use animation::{
    AnimationPlayer, NoAnimation, Segment, MUTED_SEGMENT, PAUSED_REST_FRAME, PAUSED_SEGMENT,
    PLAYING_SEGMENT, UNMUTED_SEGMENT,
};
pub use cursor::{CursorBank, Direction, PlaylistCursor};
pub use drag::{DragSurface, SwapBoard};
pub use engine::{AudioEngine, MediaHandle};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use media_session::{
    Artwork, MediaAction, MediaActionKind, MediaMetadata, MediaSessionBridge, SystemMediaControl,
};
pub use progress::{ProgressSnapshot, ProgressTracker, TickToken};
pub use selector::{ChannelVisual, PlaylistSelector};
pub use session::{MetadataGate, PlayerDisplay, PlayerSession};
pub use time::format_time;
pub use types::{
    Channel, ChannelConfig, ChannelPlaylists, CursorSharing, HandleId, MuteState, NavAction,
    PlayState, PlayerConfig, Playlist, TrackRef,
};
pub use volume::Volume;
