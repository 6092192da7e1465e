//! Frame loop tying the session to the simulated engine

use crate::{
    command::Command,
    config::ConsoleConfig,
    error::Result,
    simulation::{ConsoleAnimation, ConsoleMediaControl, SimulatedEngine},
};
use mood_playback::{MediaSessionBridge, NavAction, PlayerEvent, PlayerSession};
use tracing::info;

pub type ConsoleSession = PlayerSession<SimulatedEngine, ConsoleAnimation>;

/// Terminal host
///
/// Plays the role a browser plays for the web build: it owns the frame
/// clock, forwards media notifications to the session, and turns commands
/// into session calls.
pub struct ConsoleHost {
    session: ConsoleSession,
    media: ConsoleMediaControl,
    bridge: MediaSessionBridge,
    frame_secs: f64,
    frames: u64,
}

impl ConsoleHost {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        config.validate()?;
        let frame_secs = config.frame_secs();

        let session = PlayerSession::new(
            config.player,
            SimulatedEngine::new(config.simulation),
            ConsoleAnimation::new("play"),
            ConsoleAnimation::new("mute"),
        )?;

        let mut media = ConsoleMediaControl::default();
        let bridge = session.install_media_session(&mut media);
        info!(
            "Media session installed ({} actions)",
            bridge.registered().len()
        );

        Ok(Self {
            session,
            media,
            bridge,
            frame_secs,
            frames: 0,
        })
    }

    /// Apply one command; `Frames` runs the simulation
    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Play => self.session.toggle_play(),
            Command::Mute => self.session.toggle_mute(),
            Command::Next(channel) => {
                self.session.select_channel(channel, NavAction::Advance)?;
            }
            Command::Prev(channel) => {
                self.session.select_channel(channel, NavAction::Retreat)?;
            }
            Command::Volume(level) => self.session.set_volume(level),
            Command::Seek(secs) => {
                self.session.begin_seek_input(secs);
                self.session.commit_seek(secs);
            }
            Command::Media(action) => {
                if self.bridge.handles(action.kind()) {
                    self.session.handle_media_action(action);
                }
            }
            Command::Hover(channel) => self.session.pointer_enter(channel),
            Command::Leave(channel) => self.session.pointer_leave(channel),
            Command::Frames(count) => self.advance_frames(count),
            Command::Status | Command::Help | Command::Quit => {}
        }
        Ok(())
    }

    /// Run `count` display frames
    pub fn advance_frames(&mut self, count: u32) {
        for _ in 0..count {
            self.step();
        }
    }

    fn step(&mut self) {
        self.frames += 1;

        let dt = self.frame_secs;
        let id = self.session.active_handle();
        let report = self.session.active_media_mut().map(|handle| handle.advance(dt));

        if let (Some(id), Some(report)) = (id, report) {
            if report.metadata_loaded {
                self.session.on_metadata_ready(id);
            }
            if report.buffered_grew {
                self.session.on_buffering_progress(id);
            }
        }

        self.session.on_frame();
    }

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.session.drain_events()
    }

    /// One-line rendering of the player display
    pub fn status_line(&self) -> String {
        let display = self.session.display();
        let progress = &display.progress;

        format!(
            "[{:?}{}] {} / {} (seek {:.0}%, buffered {:.0}%) | vol {} | {} | {}",
            display.play_state,
            if display.mute_state == mood_playback::MuteState::Muted {
                ", muted"
            } else {
                ""
            },
            progress.current_time,
            progress.duration,
            progress.seek_fill_percent,
            progress.buffered_fill_percent,
            display.volume,
            if display.playlist_label.is_empty() {
                "no playlist"
            } else {
                display.playlist_label.as_str()
            },
            display.track_title.as_deref().unwrap_or("no track"),
        )
    }

    pub fn session(&self) -> &ConsoleSession {
        &self.session
    }

    pub fn media(&self) -> &ConsoleMediaControl {
        &self.media
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
