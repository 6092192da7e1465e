//! Player session - transport state machine and orchestration
//!
//! A [`PlayerSession`] owns every piece of mutable player state: the
//! transport flags, the cursor bank, the channel selector, the progress
//! tracker and the single Active Track Handle. Hosts feed it input
//! (button presses, pointer hover, seek slider, system media commands) and
//! asynchronous media notifications, call [`PlayerSession::on_frame`] once
//! per display refresh, and drain [`PlayerEvent`]s to update their view.
//!
//! Ordering guarantees, all upheld synchronously inside each call:
//! - a handle is paused and dropped before its replacement is opened
//! - selecting a track, pausing, scrubbing and stopping cancel the pending
//!   progress tick before anything else happens
//! - metadata and buffering notifications carry a [`HandleId`]; anything not
//!   addressed to the live handle is ignored

use crate::{
    animation::{
        AnimationPlayer, MUTED_SEGMENT, PAUSED_REST_FRAME, PAUSED_SEGMENT, PLAYING_SEGMENT,
        UNMUTED_SEGMENT,
    },
    cursor::CursorBank,
    engine::{AudioEngine, MediaHandle},
    error::{PlaybackError, Result},
    events::PlayerEvent,
    media_session::{MediaAction, MediaMetadata, MediaSessionBridge, SystemMediaControl},
    progress::{ProgressSnapshot, ProgressTracker, TickToken},
    selector::{ChannelVisual, PlaylistSelector},
    types::{
        Channel, CursorSharing, HandleId, MuteState, NavAction, PlayState, PlayerConfig, Playlist,
        TrackRef,
    },
    volume::Volume,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One-shot readiness of a handle's metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadataGate {
    /// Waiting for the engine's metadata notification
    Pending,
    /// Duration and ranges applied; further notifications are ignored
    Open,
}

/// The single live media resource and what the session knows about it
struct ActiveTrack<H> {
    id: HandleId,
    track: TrackRef,
    handle: H,
    gate: MetadataGate,
}

/// Everything a host needs to render the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDisplay {
    pub play_state: PlayState,
    pub mute_state: MuteState,
    pub progress: ProgressSnapshot,
    /// Volume output label (0-100)
    pub volume: u8,
    pub volume_fill_percent: f64,
    /// `"<name> playlist"`, empty before the first selection
    pub playlist_label: String,
    /// Visuals in [`Channel::ALL`] order
    pub channels: [ChannelVisual; 3],
    /// Title of the loaded track
    pub track_title: Option<String>,
}

/// Central player state
///
/// `A` renders both icons: `play_icon` for play/pause, `mute_icon` for the
/// speaker.
pub struct PlayerSession<E: AudioEngine, A: AnimationPlayer> {
    // Collaborators
    engine: E,
    play_icon: A,
    mute_icon: A,

    // Channels
    playlists: [Playlist; 3],
    cursors: CursorBank,
    selector: PlaylistSelector,

    // Transport
    play_state: PlayState,
    volume: Volume,
    active: Option<ActiveTrack<E::Handle>>,
    next_handle: u64,

    // Display
    progress: ProgressTracker,

    // Settings
    seek_offset_secs: f64,
    metadata: MediaMetadata,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<E: AudioEngine, A: AnimationPlayer> PlayerSession<E, A> {
    /// Create a session; the play icon rests on its paused frame
    ///
    /// Fails if the configuration is invalid (empty playlist, volume above
    /// 100, non-positive seek offset) or the initial track cannot be opened.
    pub fn new(config: PlayerConfig, engine: E, play_icon: A, mute_icon: A) -> Result<Self> {
        config.validate()?;

        let playlists = [
            config.channels.epic.to_playlist()?,
            config.channels.reflex.to_playlist()?,
            config.channels.cool.to_playlist()?,
        ];

        let mut session = Self {
            engine,
            play_icon,
            mute_icon,
            playlists,
            cursors: CursorBank::new(config.cursor_sharing),
            selector: PlaylistSelector::new(),
            play_state: PlayState::Paused,
            volume: Volume::new(config.volume),
            active: None,
            next_handle: 1,
            progress: ProgressTracker::new(),
            seek_offset_secs: config.seek_offset_secs,
            metadata: config.metadata,
            pending_events: Vec::new(),
        };

        session.play_icon.jump_to(PAUSED_REST_FRAME);

        if let Some(track) = config.initial_track {
            session.cue(TrackRef::new(track))?;
        }

        info!(
            "Player session ready (cursor sharing: {:?}, volume: {})",
            session.cursors.sharing(),
            session.volume.level()
        );
        Ok(session)
    }

    // ===== Transport =====

    /// Play if paused, pause if playing
    ///
    /// Without a loaded track this is a no-op.
    pub fn toggle_play(&mut self) {
        match self.play_state {
            PlayState::Playing => self.pause(),
            PlayState::Paused => self.resume(),
        }
    }

    fn pause(&mut self) {
        let Some(active) = self.active.as_mut() else {
            debug!("Pause ignored: no track loaded");
            return;
        };

        active.handle.pause();
        self.progress.cancel();
        self.play_icon.play_segment(PAUSED_SEGMENT);
        self.set_play_state(PlayState::Paused);
    }

    fn resume(&mut self) {
        let Some(active) = self.active.as_mut() else {
            debug!("Play ignored: no track loaded");
            return;
        };

        if let Err(e) = active.handle.play() {
            warn!("Failed to start playback of {}: {}", active.track, e);
            return;
        }

        // An open scrub keeps the loop suspended until it is committed
        if !self.progress.is_scrubbing() {
            self.progress.schedule();
        }
        self.play_icon.play_segment(PLAYING_SEGMENT);
        self.set_play_state(PlayState::Playing);
    }

    /// Flip the mute flag; play/pause is untouched
    ///
    /// The flag is remembered and applied to every handle opened later.
    pub fn toggle_mute(&mut self) {
        let muted = self.volume.toggle_mute();

        if let Some(active) = self.active.as_mut() {
            active.handle.set_muted(muted);
        }

        let (segment, state) = if muted {
            (MUTED_SEGMENT, MuteState::Muted)
        } else {
            (UNMUTED_SEGMENT, MuteState::Unmuted)
        };
        self.mute_icon.play_segment(segment);

        debug!("Mute toggled: {:?}", state);
        self.pending_events.push(PlayerEvent::MuteChanged { state });
    }

    /// Set volume (0-100, clamped)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);

        if let Some(active) = self.active.as_mut() {
            active.handle.set_volume(self.volume.gain());
        }

        self.pending_events.push(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    /// Replace the Active Track Handle with `track` and start playing it
    ///
    /// The previous handle is paused and released first. Playback starts
    /// once metadata is available: immediately if the engine already has
    /// it, otherwise when [`on_metadata_ready`](Self::on_metadata_ready) is
    /// called with the returned id. Ends in [`PlayState::Playing`] whatever
    /// the prior state.
    pub fn select_track(&mut self, track: TrackRef) -> Result<HandleId> {
        let id = self.replace_active(track)?;

        self.play_icon.play_segment(PLAYING_SEGMENT);
        self.set_play_state(PlayState::Playing);

        if self.active_gate_ready() {
            self.open_gate();
        }

        Ok(id)
    }

    /// Load `track` without starting it
    pub fn cue(&mut self, track: TrackRef) -> Result<HandleId> {
        let id = self.replace_active(track)?;

        if self.play_state == PlayState::Playing {
            self.play_icon.play_segment(PAUSED_SEGMENT);
            self.set_play_state(PlayState::Paused);
        }

        if self.active_gate_ready() {
            self.open_gate();
        }

        Ok(id)
    }

    /// System stop: rewind to zero and pause
    pub fn stop(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.handle.set_position(0.0);
        }
        self.progress.cancel_scrub();
        self.progress.reset_position();

        if self.play_state == PlayState::Playing {
            if let Some(active) = self.active.as_mut() {
                active.handle.pause();
            }
            self.progress.cancel();
            self.play_icon.play_segment(PAUSED_SEGMENT);
            self.set_play_state(PlayState::Paused);
        }

        debug!("Stopped");
        self.pending_events.push(PlayerEvent::Stopped);
    }

    // ===== Channels =====

    /// Activate a channel button
    ///
    /// `Advance` is the primary action (click), `Retreat` the secondary one
    /// (context menu). Both update the selection visuals the same way, then
    /// play the track the cursor lands on.
    pub fn select_channel(&mut self, channel: Channel, action: NavAction) -> Result<HandleId> {
        let playlist = &self.playlists[channel.index()];
        let cursor = self.cursors.cursor_mut(channel);

        let track = match action {
            NavAction::Advance => cursor.advance(playlist),
            NavAction::Retreat => cursor.retreat(playlist),
        }
        .clone();
        let index = cursor.index();

        self.selector.select(channel, playlist.name());
        debug!("Channel {} {:?} -> track {} ({})", channel, action, index, track);

        self.pending_events.push(PlayerEvent::ChannelSelected {
            channel,
            action,
            index,
        });

        self.select_track(track)
    }

    /// Pointer entered a channel button
    pub fn pointer_enter(&mut self, channel: Channel) {
        self.selector.pointer_enter(channel);
    }

    /// Pointer left a channel button
    pub fn pointer_leave(&mut self, channel: Channel) {
        self.selector.pointer_leave(channel);
    }

    // ===== Media notifications =====

    /// The engine reports metadata for handle `id`
    ///
    /// Only the live handle's first notification has an effect.
    pub fn on_metadata_ready(&mut self, id: HandleId) {
        match self.active.as_ref().map(|a| (a.id, a.gate)) {
            Some((live, MetadataGate::Pending)) if live == id => self.open_gate(),
            Some((live, MetadataGate::Open)) if live == id => {
                debug!("Metadata for {} already applied", id);
            }
            _ => debug!("Ignoring stale metadata notification for {}", id),
        }
    }

    /// The engine reports buffering progress for handle `id`
    pub fn on_buffering_progress(&mut self, id: HandleId) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if active.id != id {
            debug!("Ignoring stale buffering notification for {}", id);
            return;
        }
        // Ranges are not queryable before metadata.
        if active.gate != MetadataGate::Open {
            return;
        }

        if let Some(end) = active.handle.buffered_end() {
            self.progress.update_buffered(end);
            self.pending_events.push(PlayerEvent::BufferedChanged {
                percent: self.progress.buffered_fill_percent(),
            });
        }
    }

    // ===== Progress loop =====

    /// Display refresh: run the pending progress tick, if any
    pub fn on_frame(&mut self) {
        if let Some(token) = self.progress.pending() {
            self.tick(token);
        }
    }

    /// Run the progress tick identified by `token`
    ///
    /// Returns false without touching the display if `token` was cancelled
    /// or superseded, or playback is not running. On success the next tick
    /// is scheduled.
    pub fn tick(&mut self, token: TickToken) -> bool {
        if !self.progress.fire(token) {
            return false;
        }
        if self.play_state != PlayState::Playing {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let position = active.handle.position();
        let duration = (active.gate == MetadataGate::Open).then(|| active.handle.duration());

        self.progress.update_position(position);
        self.progress.schedule();

        self.pending_events.push(PlayerEvent::PositionUpdate {
            position_secs: position,
            duration_secs: duration,
        });
        true
    }

    /// The user is dragging the seek control
    ///
    /// Updates the time display and suspends the progress loop so the
    /// automatic tick does not fight the pointer.
    pub fn begin_seek_input(&mut self, value: f64) {
        self.progress.begin_scrub(value);
        if self.play_state == PlayState::Playing {
            self.progress.cancel();
        }
    }

    /// The user released the seek control at `value` seconds
    pub fn commit_seek(&mut self, value: f64) {
        let position = self.progress.end_scrub(value);

        if let Some(active) = self.active.as_mut() {
            active.handle.set_position(position);
        }
        if self.play_state == PlayState::Playing {
            self.progress.schedule();
        }

        self.push_position_update(position);
    }

    // ===== Seeking =====

    /// Seek to `secs`, clamped to the known duration
    ///
    /// `fast` requests keyframe-approximate seeking, used only when the
    /// handle supports it.
    pub fn seek_to(&mut self, secs: f64, fast: bool) -> Result<()> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(PlaybackError::InvalidSeekPosition(secs));
        }
        let Some(active) = self.active.as_mut() else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        let target = if active.gate == MetadataGate::Open && active.handle.duration().is_finite() {
            secs.min(active.handle.duration())
        } else {
            secs
        };

        if fast && active.handle.supports_fast_seek() {
            active.handle.fast_seek(target);
        } else {
            active.handle.set_position(target);
        }

        self.progress.update_position(target);
        self.push_position_update(target);
        Ok(())
    }

    /// Seek relative to the current position; the result is clamped at 0
    pub fn seek_by(&mut self, delta_secs: f64) -> Result<()> {
        let Some(active) = self.active.as_ref() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        let target = (active.handle.position() + delta_secs).max(0.0);
        self.seek_to(target, false)
    }

    // ===== System media control =====

    /// Publish metadata and register handlers with the platform
    pub fn install_media_session(
        &self,
        control: &mut impl SystemMediaControl,
    ) -> MediaSessionBridge {
        MediaSessionBridge::install(control, &self.metadata)
    }

    /// Forward a system media command into the transport
    pub fn handle_media_action(&mut self, action: MediaAction) {
        debug!("Media action: {:?}", action);

        let result = match action {
            MediaAction::Play => {
                if self.play_state == PlayState::Paused {
                    self.resume();
                }
                Ok(())
            }
            MediaAction::Pause => {
                if self.play_state == PlayState::Playing {
                    self.pause();
                }
                Ok(())
            }
            MediaAction::SeekBackward { offset } => self.seek_by(-self.media_offset(offset)),
            MediaAction::SeekForward { offset } => self.seek_by(self.media_offset(offset)),
            MediaAction::SeekTo { time, fast } => self.seek_to(time, fast),
            MediaAction::Stop => {
                self.stop();
                Ok(())
            }
        };

        if let Err(e) = result {
            debug!("Media action {:?} skipped: {}", action, e);
        }
    }

    // ===== State queries =====

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }

    pub fn mute_state(&self) -> MuteState {
        if self.volume.is_muted() {
            MuteState::Muted
        } else {
            MuteState::Unmuted
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn cursor_sharing(&self) -> CursorSharing {
        self.cursors.sharing()
    }

    pub fn cursors(&self) -> &CursorBank {
        &self.cursors
    }

    pub fn playlist(&self, channel: Channel) -> &Playlist {
        &self.playlists[channel.index()]
    }

    pub fn selector(&self) -> &PlaylistSelector {
        &self.selector
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn metadata(&self) -> &MediaMetadata {
        &self.metadata
    }

    /// Id of the live handle
    pub fn active_handle(&self) -> Option<HandleId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn active_track(&self) -> Option<&TrackRef> {
        self.active.as_ref().map(|a| &a.track)
    }

    pub fn metadata_gate(&self) -> Option<MetadataGate> {
        self.active.as_ref().map(|a| a.gate)
    }

    /// The live media handle, for hosts that wire platform events to it
    pub fn active_media(&self) -> Option<&E::Handle> {
        self.active.as_ref().map(|a| &a.handle)
    }

    pub fn active_media_mut(&mut self) -> Option<&mut E::Handle> {
        self.active.as_mut().map(|a| &mut a.handle)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn play_icon(&self) -> &A {
        &self.play_icon
    }

    pub fn mute_icon(&self) -> &A {
        &self.mute_icon
    }

    /// Current view-model
    pub fn display(&self) -> PlayerDisplay {
        PlayerDisplay {
            play_state: self.play_state,
            mute_state: self.mute_state(),
            progress: self.progress.snapshot(),
            volume: self.volume.level(),
            volume_fill_percent: self.volume.fill_percent(),
            playlist_label: self.selector.label().to_string(),
            channels: Channel::ALL.map(|c| self.selector.visual(c)),
            track_title: self.active_track().map(|t| t.title().to_string()),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// The UI should call this after each input and once per frame.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Stop → discard → create. Leaves the new handle with a pending gate.
    fn replace_active(&mut self, track: TrackRef) -> Result<HandleId> {
        self.progress.cancel();

        let previous = self.active.take().map(|mut old| {
            old.handle.pause();
            debug!("Released handle {} ({})", old.id, old.track);
            old.id
        });
        self.progress.reset_for_new_track();

        let mut handle = match self.engine.open(&track) {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Failed to open {}: {}", track, e);
                if self.play_state == PlayState::Playing {
                    self.play_icon.play_segment(PAUSED_SEGMENT);
                    self.set_play_state(PlayState::Paused);
                }
                return Err(e);
            }
        };

        handle.set_volume(self.volume.gain());
        handle.set_muted(self.volume.is_muted());
        handle.load();

        let id = HandleId(self.next_handle);
        self.next_handle += 1;

        info!("Loading {} as handle {}", track, id);
        self.pending_events.push(PlayerEvent::TrackChanged {
            handle: id,
            track: track.to_string(),
            previous,
        });

        self.active = Some(ActiveTrack {
            id,
            track,
            handle,
            gate: MetadataGate::Pending,
        });
        Ok(id)
    }

    fn active_gate_ready(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.gate == MetadataGate::Pending && a.handle.metadata_ready())
    }

    /// Apply duration, seek bounds and buffered range, then start playback
    /// if the transport is in the playing state
    fn open_gate(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.gate = MetadataGate::Open;

        let id = active.id;
        let duration = active.handle.duration();
        self.progress.apply_duration(duration);
        if let Some(end) = active.handle.buffered_end() {
            self.progress.update_buffered(end);
        }

        let start = if self.play_state == PlayState::Playing && active.handle.is_paused() {
            active.handle.play().map_err(|e| {
                warn!("Failed to start playback of {}: {}", active.track, e);
                e
            })
        } else {
            Ok(())
        };

        debug!("Metadata applied for {} (duration {:.1}s)", id, duration);
        self.pending_events.push(PlayerEvent::MetadataApplied {
            handle: id,
            duration_secs: duration,
        });

        if self.play_state == PlayState::Playing {
            if start.is_err() {
                self.progress.cancel();
                self.play_icon.play_segment(PAUSED_SEGMENT);
                self.set_play_state(PlayState::Paused);
            } else if !self.progress.is_scrubbing() {
                self.progress.schedule();
            }
        }
    }

    /// Offset for a relative media seek; zero or non-finite falls back to the default
    fn media_offset(&self, offset: Option<f64>) -> f64 {
        offset
            .filter(|o| o.is_finite() && *o > 0.0)
            .unwrap_or(self.seek_offset_secs)
    }

    fn set_play_state(&mut self, state: PlayState) {
        if self.play_state != state {
            self.play_state = state;
            debug!("Play state: {:?}", state);
            self.pending_events
                .push(PlayerEvent::PlayStateChanged { state });
        }
    }

    fn push_position_update(&mut self, position: f64) {
        let duration = self
            .active
            .as_ref()
            .filter(|a| a.gate == MetadataGate::Open)
            .map(|a| a.handle.duration());

        self.pending_events.push(PlayerEvent::PositionUpdate {
            position_secs: position,
            duration_secs: duration,
        });
    }
}
