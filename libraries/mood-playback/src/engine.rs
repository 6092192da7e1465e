//! Platform-agnostic audio engine traits
//!
//! Abstracts media loading/playback for different hosts (an HTML audio
//! element in the browser, a simulated clock in the console player, a
//! recording mock in tests).

use crate::error::Result;
use crate::types::TrackRef;

/// Factory for media handles
///
/// The session holds at most one handle at a time. Before asking for a new
/// one it pauses the previous handle and drops it, so an implementation
/// never has two live handles from the same session.
pub trait AudioEngine {
    type Handle: MediaHandle;

    /// Create a handle for `track`. Loading starts with [`MediaHandle::load`].
    fn open(&mut self, track: &TrackRef) -> Result<Self::Handle>;
}

/// One loaded media resource (the Active Track Handle)
///
/// `duration` and `buffered_end` are only meaningful once
/// [`metadata_ready`](MediaHandle::metadata_ready) reports true; the session
/// never calls them earlier.
pub trait MediaHandle {
    /// Begin fetching/decoding
    fn load(&mut self);

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Precise seek, in seconds
    fn set_position(&mut self, secs: f64);

    /// Whether [`fast_seek`](MediaHandle::fast_seek) is cheaper than a
    /// precise seek on this platform
    fn supports_fast_seek(&self) -> bool {
        false
    }

    /// Approximate seek (nearest keyframe)
    fn fast_seek(&mut self, secs: f64) {
        self.set_position(secs);
    }

    /// Linear volume, `0.0..=1.0`
    fn set_volume(&mut self, gain: f64);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    /// Whether duration and seekable/buffered ranges can be queried
    fn metadata_ready(&self) -> bool;

    /// Total duration in seconds
    fn duration(&self) -> f64;

    /// End of the last buffered range in seconds, if any range exists
    fn buffered_end(&self) -> Option<f64>;
}

/// Engine whose handles play silence for a fixed duration
///
/// Metadata is available immediately unless `deferred_metadata` is set.
#[cfg(test)]
pub struct DummyEngine {
    pub duration: f64,
    pub deferred_metadata: bool,
    pub opened: Vec<TrackRef>,
}

#[cfg(test)]
impl DummyEngine {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            deferred_metadata: false,
            opened: Vec::new(),
        }
    }
}

#[cfg(test)]
impl AudioEngine for DummyEngine {
    type Handle = DummyHandle;

    fn open(&mut self, track: &TrackRef) -> Result<DummyHandle> {
        self.opened.push(track.clone());
        Ok(DummyHandle {
            duration: self.duration,
            position: 0.0,
            paused: true,
            muted: false,
            gain: 1.0,
            metadata_ready: !self.deferred_metadata,
        })
    }
}

#[cfg(test)]
pub struct DummyHandle {
    pub duration: f64,
    pub position: f64,
    pub paused: bool,
    pub muted: bool,
    pub gain: f64,
    pub metadata_ready: bool,
}

#[cfg(test)]
impl MediaHandle for DummyHandle {
    fn load(&mut self) {}

    fn play(&mut self) -> Result<()> {
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, secs: f64) {
        self.position = secs;
    }

    fn set_volume(&mut self, gain: f64) {
        self.gain = gain;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn metadata_ready(&self) -> bool {
        self.metadata_ready
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn buffered_end(&self) -> Option<f64> {
        Some(self.duration)
    }
}
