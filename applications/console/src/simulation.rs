//! Simulated collaborators for the terminal host
//!
//! Nothing here produces sound. Handles advance a virtual clock one frame at
//! a time, report metadata after a fixed number of frames, and buffer ahead
//! at a fixed rate, which is enough to exercise every asynchronous path of
//! the session.

use crate::config::SimulationSettings;
use mood_playback::{
    AnimationPlayer, AudioEngine, MediaActionKind, MediaHandle, MediaMetadata, Result, Segment,
    SystemMediaControl, TrackRef,
};
use tracing::{debug, info};

/// Engine creating [`SimulatedHandle`]s
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    settings: SimulationSettings,
    opened: usize,
}

impl SimulatedEngine {
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            settings,
            opened: 0,
        }
    }

    /// Handles created so far
    pub fn opened(&self) -> usize {
        self.opened
    }
}

impl AudioEngine for SimulatedEngine {
    type Handle = SimulatedHandle;

    fn open(&mut self, track: &TrackRef) -> Result<SimulatedHandle> {
        self.opened += 1;
        debug!("Simulated open: {}", track);

        Ok(SimulatedHandle {
            track: track.clone(),
            duration: self.settings.track_duration_secs,
            position: 0.0,
            paused: true,
            muted: false,
            gain: 1.0,
            loading: false,
            loaded_frames: 0,
            metadata_frames: self.settings.metadata_frames,
            buffered: 0.0,
            buffer_rate: self.settings.buffer_rate,
            fast_seek: self.settings.fast_seek,
        })
    }
}

/// What changed during one simulated frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Metadata became available this frame
    pub metadata_loaded: bool,

    /// The buffered range grew this frame
    pub buffered_grew: bool,
}

/// Virtual media resource
#[derive(Debug, Clone)]
pub struct SimulatedHandle {
    track: TrackRef,
    duration: f64,
    position: f64,
    paused: bool,
    muted: bool,
    gain: f64,
    loading: bool,
    loaded_frames: u32,
    metadata_frames: u32,
    buffered: f64,
    buffer_rate: f64,
    fast_seek: bool,
}

impl SimulatedHandle {
    /// Advance the virtual clock by `dt` seconds
    pub fn advance(&mut self, dt: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.loading {
            return report;
        }

        if !self.metadata_ready() {
            self.loaded_frames += 1;
            report.metadata_loaded = self.metadata_ready();
            return report;
        }

        if self.buffered < self.duration && self.buffer_rate > 0.0 {
            self.buffered = (self.buffered + self.buffer_rate * dt).min(self.duration);
            report.buffered_grew = true;
        }

        if !self.paused {
            self.position = (self.position + dt).min(self.duration);
        }

        report
    }

    pub fn track(&self) -> &TrackRef {
        &self.track
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl MediaHandle for SimulatedHandle {
    fn load(&mut self) {
        self.loading = true;
    }

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
        self.position = secs.clamp(0.0, self.duration);
    }

    fn supports_fast_seek(&self) -> bool {
        self.fast_seek
    }

    fn fast_seek(&mut self, secs: f64) {
        // Keyframes every two seconds
        self.set_position((secs / 2.0).floor() * 2.0);
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
        self.loading && self.loaded_frames >= self.metadata_frames
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn buffered_end(&self) -> Option<f64> {
        (self.buffered > 0.0).then_some(self.buffered)
    }
}

/// Animation player that logs the segments it would render
#[derive(Debug, Clone)]
pub struct ConsoleAnimation {
    name: &'static str,
    frame: u32,
}

impl ConsoleAnimation {
    pub fn new(name: &'static str) -> Self {
        Self { name, frame: 0 }
    }

    /// Frame the icon rests on after its last transition
    pub fn frame(&self) -> u32 {
        self.frame
    }
}

impl AnimationPlayer for ConsoleAnimation {
    fn play_segment(&mut self, segment: Segment) {
        debug!("{} icon: frames {}-{}", self.name, segment.from, segment.to);
        self.frame = segment.to;
    }

    fn jump_to(&mut self, frame: u32) {
        debug!("{} icon: jump to frame {}", self.name, frame);
        self.frame = frame;
    }
}

/// Media session that accepts every action and logs the metadata
#[derive(Debug, Default)]
pub struct ConsoleMediaControl {
    now_playing: Option<String>,
}

impl ConsoleMediaControl {
    pub fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }
}

impl SystemMediaControl for ConsoleMediaControl {
    fn is_supported(&self) -> bool {
        true
    }

    fn set_metadata(&mut self, metadata: &MediaMetadata) {
        let line = format!("{} - {} ({})", metadata.title, metadata.artist, metadata.album);
        info!("Now playing: {}", line);
        self.now_playing = Some(line);
    }

    fn register(&mut self, action: MediaActionKind) -> bool {
        debug!("Registered media action '{}'", action.as_str());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(metadata_frames: u32) -> SimulationSettings {
        SimulationSettings {
            metadata_frames,
            track_duration_secs: 10.0,
            buffer_rate: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn metadata_arrives_after_configured_frames() {
        let mut engine = SimulatedEngine::new(settings(2));
        let mut handle = engine.open(&TrackRef::new("a.mp3")).unwrap();

        assert!(!handle.advance(0.5).metadata_loaded, "not loading yet");
        handle.load();
        assert!(!handle.advance(0.5).metadata_loaded);
        assert!(handle.advance(0.5).metadata_loaded);
        assert!(handle.metadata_ready());
        assert_eq!(engine.opened(), 1);
    }

    #[test]
    fn clock_only_runs_while_playing() {
        let mut engine = SimulatedEngine::new(settings(0));
        let mut handle = engine.open(&TrackRef::new("a.mp3")).unwrap();
        handle.load();

        handle.advance(1.0);
        assert_eq!(handle.position(), 0.0);

        handle.play().unwrap();
        handle.advance(1.0);
        handle.advance(1.0);
        assert_eq!(handle.position(), 2.0);
        assert_eq!(handle.buffered_end(), Some(6.0));
    }

    #[test]
    fn position_stops_at_duration() {
        let mut engine = SimulatedEngine::new(settings(0));
        let mut handle = engine.open(&TrackRef::new("a.mp3")).unwrap();
        handle.load();
        handle.play().unwrap();

        for _ in 0..30 {
            handle.advance(1.0);
        }
        assert_eq!(handle.position(), 10.0);
        assert_eq!(handle.buffered_end(), Some(10.0));
    }

    #[test]
    fn fast_seek_snaps_to_keyframe() {
        let mut engine = SimulatedEngine::new(settings(0));
        let mut handle = engine.open(&TrackRef::new("a.mp3")).unwrap();
        handle.fast_seek(5.5);
        assert_eq!(handle.position(), 4.0);
    }

    #[test]
    fn animation_remembers_resting_frame() {
        let mut icon = ConsoleAnimation::new("play");
        icon.jump_to(14);
        assert_eq!(icon.frame(), 14);
        icon.play_segment(Segment::new(14, 27));
        assert_eq!(icon.frame(), 27);
    }
}
