//! Core types for playlist and transport management

use crate::error::{PlaybackError, Result};
use crate::media_session::MediaMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque locator of one playable audio item (path or URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackRef(String);

impl TrackRef {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Raw locator as handed to the audio engine
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable title: the last path segment without its extension
    pub fn title(&self) -> &str {
        let name = self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0);
        match name.rfind('.') {
            Some(dot) if dot > 0 => &name[..dot],
            _ => name,
        }
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TrackRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Ordered, fixed-length, non-empty list of tracks
///
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    name: String,
    tracks: Vec<TrackRef>,
}

impl Playlist {
    /// Build a playlist, rejecting an empty track list
    pub fn new(name: impl Into<String>, tracks: Vec<TrackRef>) -> Result<Self> {
        let name = name.into();
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyPlaylist(name));
        }
        Ok(Self { name, tracks })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    /// Number of tracks (always at least 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`, which must be in `[0, len)`
    pub fn get(&self, index: usize) -> Option<&TrackRef> {
        self.tracks.get(index)
    }
}

/// One of the three selectable playlist bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Epic,
    Reflex,
    Cool,
}

impl Channel {
    /// All channels in display order
    pub const ALL: [Channel; 3] = [Channel::Epic, Channel::Reflex, Channel::Cool];

    /// Position in [`Channel::ALL`]
    pub fn index(self) -> usize {
        match self {
            Channel::Epic => 0,
            Channel::Reflex => 1,
            Channel::Cool => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Epic => "epic",
            Channel::Reflex => "reflex",
            Channel::Cool => "cool",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "epic" | "fire" => Ok(Channel::Epic),
            "reflex" | "mind" => Ok(Channel::Reflex),
            "cool" | "chill" => Ok(Channel::Cool),
            other => Err(PlaybackError::Config(format!("unknown channel '{other}'"))),
        }
    }
}

/// What a channel activation does to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavAction {
    /// Primary action (click/tap): next track
    Advance,
    /// Secondary action (context menu/long press): previous track
    Retreat,
}

/// Play/pause half of the transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Mute half of the transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuteState {
    Muted,
    Unmuted,
}

/// Identity of an Active Track Handle
///
/// Issued by the session, strictly increasing. Async notifications carry it
/// so that callbacks belonging to a replaced handle can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether the three channels navigate with one cursor or one each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorSharing {
    /// One cursor for all channels: position and direction memory carry over
    /// when switching playlists
    Shared,

    /// Independent cursor per channel
    PerChannel,
}

/// Track list and label of one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Label shown when the channel is active (`"<name> playlist"`)
    pub name: String,

    /// Track locators, in play order
    pub tracks: Vec<String>,
}

impl ChannelConfig {
    /// Build the runtime playlist
    pub fn to_playlist(&self) -> Result<Playlist> {
        Playlist::new(
            self.name.clone(),
            self.tracks.iter().map(|t| TrackRef::new(t.as_str())).collect(),
        )
    }
}

/// Playlists bound to each channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPlaylists {
    #[serde(default = "default_epic")]
    pub epic: ChannelConfig,

    #[serde(default = "default_reflex")]
    pub reflex: ChannelConfig,

    #[serde(default = "default_cool")]
    pub cool: ChannelConfig,
}

impl ChannelPlaylists {
    pub fn get(&self, channel: Channel) -> &ChannelConfig {
        match channel {
            Channel::Epic => &self.epic,
            Channel::Reflex => &self.reflex,
            Channel::Cool => &self.cool,
        }
    }
}

impl Default for ChannelPlaylists {
    fn default() -> Self {
        Self {
            epic: default_epic(),
            reflex: default_reflex(),
            cool: default_cool(),
        }
    }
}

fn channel(name: &str, tracks: &[&str]) -> ChannelConfig {
    ChannelConfig {
        name: name.to_string(),
        tracks: tracks.iter().map(|t| (*t).to_string()).collect(),
    }
}

fn default_epic() -> ChannelConfig {
    channel(
        "epic",
        &[
            "./playlists/epic/Armored Titan - Shingeki no Kyoji.mp3",
            "./playlists/epic/Kara Theme - Detroit Become Human.mp3",
            "./playlists/epic/The Opened Way - Shadow of the Colossus.mp3",
            "./playlists/epic/Ultra Instinct - Dragon Ball Super.mp3",
        ],
    )
}

fn default_reflex() -> ChannelConfig {
    channel(
        "reflex",
        &[
            "./playlists/reflex/Death Note - Main Theme.mp3",
            "./playlists/reflex/Final Fantasy - Prelude (Orchestral).mp3",
            "./playlists/reflex/Floating Museum - Ghost In The Shell.mp3",
            "./playlists/reflex/Gwyn, Lord of Cinder - Dark Souls.mp3",
        ],
    )
}

fn default_cool() -> ChannelConfig {
    channel(
        "cool",
        &[
            "./playlists/cool/Pearl Jam - Black.mp3",
            "./playlists/cool/higurashi no naku koro ni opening full.mp3",
            "./playlists/cool/Naruto Ending Theme - Wind by Akeboshi.mp3",
            "./playlists/cool/Naruto Hinata Bicycle ending xd.mp3",
        ],
    )
}

/// Configuration for a player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Playlists bound to the three channels
    #[serde(default)]
    pub channels: ChannelPlaylists,

    /// Cursor ownership policy (default: Shared)
    #[serde(default = "default_cursor_sharing")]
    pub cursor_sharing: CursorSharing,

    /// Initial volume (0-100, default: 100)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Seek step for system media seek-backward/forward without an
    /// explicit offset (default: 10 s)
    #[serde(default = "default_seek_offset")]
    pub seek_offset_secs: f64,

    /// Track cued (loaded, paused) when the session starts
    #[serde(default)]
    pub initial_track: Option<String>,

    /// Display metadata published to the system media control
    #[serde(default)]
    pub metadata: MediaMetadata,
}

fn default_cursor_sharing() -> CursorSharing {
    CursorSharing::Shared
}

fn default_volume() -> u8 {
    100
}

fn default_seek_offset() -> f64 {
    10.0
}

impl PlayerConfig {
    /// Check invariants the session relies on
    pub fn validate(&self) -> Result<()> {
        for channel in Channel::ALL {
            self.channels.get(channel).to_playlist()?;
        }
        if self.volume > 100 {
            return Err(PlaybackError::Config(format!(
                "volume must be 0-100, got {}",
                self.volume
            )));
        }
        if !self.seek_offset_secs.is_finite() || self.seek_offset_secs <= 0.0 {
            return Err(PlaybackError::Config(format!(
                "seek_offset_secs must be positive, got {}",
                self.seek_offset_secs
            )));
        }
        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            channels: ChannelPlaylists::default(),
            cursor_sharing: default_cursor_sharing(),
            volume: default_volume(),
            seek_offset_secs: default_seek_offset(),
            initial_track: None,
            metadata: MediaMetadata::default(),
        }
    }
}
