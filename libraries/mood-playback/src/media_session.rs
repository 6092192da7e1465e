//! System media control integration
//!
//! Hardware keys, lock screens and notification shades send transport
//! commands through the platform's media session. The bridge publishes
//! track metadata and registers the actions the player understands; the
//! host then forwards each incoming command to
//! [`PlayerSession::handle_media_action`](crate::PlayerSession::handle_media_action).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One artwork image offered to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub src: String,
    /// e.g. `"96x96"`
    pub sizes: String,
    /// MIME type, e.g. `"image/png"`
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Display metadata for the system media surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub artwork: Vec<Artwork>,
}

impl Default for MediaMetadata {
    fn default() -> Self {
        const COVER: &str = "https://assets.codepen.io/4358584/1.300.jpg";
        Self {
            title: "Komorebi".to_string(),
            artist: "Anitek".to_string(),
            album: "MainStay".to_string(),
            artwork: ["96x96", "128x128", "192x192", "256x256", "384x384", "512x512"]
                .into_iter()
                .map(|sizes| Artwork {
                    src: COVER.to_string(),
                    sizes: sizes.to_string(),
                    mime_type: "image/png".to_string(),
                })
                .collect(),
        }
    }
}

/// Action names a handler can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaActionKind {
    Play,
    Pause,
    SeekBackward,
    SeekForward,
    SeekTo,
    Stop,
}

impl MediaActionKind {
    pub const ALL: [MediaActionKind; 6] = [
        MediaActionKind::Play,
        MediaActionKind::Pause,
        MediaActionKind::SeekBackward,
        MediaActionKind::SeekForward,
        MediaActionKind::SeekTo,
        MediaActionKind::Stop,
    ];

    /// Platform action name
    pub fn as_str(self) -> &'static str {
        match self {
            MediaActionKind::Play => "play",
            MediaActionKind::Pause => "pause",
            MediaActionKind::SeekBackward => "seekbackward",
            MediaActionKind::SeekForward => "seekforward",
            MediaActionKind::SeekTo => "seekto",
            MediaActionKind::Stop => "stop",
        }
    }
}

/// An incoming command from the system media control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MediaAction {
    Play,
    Pause,
    /// Step back by `offset` seconds (platform default when absent)
    SeekBackward { offset: Option<f64> },
    /// Step forward by `offset` seconds (platform default when absent)
    SeekForward { offset: Option<f64> },
    /// Jump to `time` seconds; `fast` asks for keyframe-approximate seeking
    SeekTo { time: f64, fast: bool },
    Stop,
}

impl MediaAction {
    pub fn kind(&self) -> MediaActionKind {
        match self {
            MediaAction::Play => MediaActionKind::Play,
            MediaAction::Pause => MediaActionKind::Pause,
            MediaAction::SeekBackward { .. } => MediaActionKind::SeekBackward,
            MediaAction::SeekForward { .. } => MediaActionKind::SeekForward,
            MediaAction::SeekTo { .. } => MediaActionKind::SeekTo,
            MediaAction::Stop => MediaActionKind::Stop,
        }
    }
}

/// Platform media session
pub trait SystemMediaControl {
    /// False when the platform has no media session at all
    fn is_supported(&self) -> bool;

    fn set_metadata(&mut self, metadata: &MediaMetadata);

    /// Register interest in `action`; returns false if the platform refuses it
    fn register(&mut self, action: MediaActionKind) -> bool;
}

/// Outcome of [`MediaSessionBridge::install`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSessionBridge {
    registered: Vec<MediaActionKind>,
}

impl MediaSessionBridge {
    /// Publish `metadata` and register every supported action
    ///
    /// An unsupported platform yields an empty bridge and no calls beyond
    /// `is_supported`.
    pub fn install(control: &mut impl SystemMediaControl, metadata: &MediaMetadata) -> Self {
        if !control.is_supported() {
            debug!("System media control unavailable, skipping integration");
            return Self::default();
        }

        control.set_metadata(metadata);

        let mut registered = Vec::with_capacity(MediaActionKind::ALL.len());
        for action in MediaActionKind::ALL {
            if control.register(action) {
                registered.push(action);
            } else {
                warn!("Media session refused action '{}'", action.as_str());
            }
        }

        debug!("Media session installed with {} actions", registered.len());
        Self { registered }
    }

    pub fn is_active(&self) -> bool {
        !self.registered.is_empty()
    }

    pub fn handles(&self, action: MediaActionKind) -> bool {
        self.registered.contains(&action)
    }

    pub fn registered(&self) -> &[MediaActionKind] {
        &self.registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingControl {
        supported: bool,
        refuse: Vec<MediaActionKind>,
        metadata: Option<MediaMetadata>,
        registered: Vec<MediaActionKind>,
    }

    impl SystemMediaControl for RecordingControl {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn set_metadata(&mut self, metadata: &MediaMetadata) {
            self.metadata = Some(metadata.clone());
        }

        fn register(&mut self, action: MediaActionKind) -> bool {
            if self.refuse.contains(&action) {
                return false;
            }
            self.registered.push(action);
            true
        }
    }

    #[test]
    fn installs_metadata_and_all_actions() {
        let mut control = RecordingControl {
            supported: true,
            ..Default::default()
        };
        let bridge = MediaSessionBridge::install(&mut control, &MediaMetadata::default());

        assert!(bridge.is_active());
        assert_eq!(bridge.registered(), &MediaActionKind::ALL);
        assert_eq!(control.registered, MediaActionKind::ALL.to_vec());
        assert_eq!(control.metadata.unwrap().title, "Komorebi");
    }

    #[test]
    fn unsupported_platform_is_skipped() {
        let mut control = RecordingControl::default();
        let bridge = MediaSessionBridge::install(&mut control, &MediaMetadata::default());

        assert!(!bridge.is_active());
        assert!(control.metadata.is_none());
        assert!(control.registered.is_empty());
    }

    #[test]
    fn refused_actions_are_left_out() {
        let mut control = RecordingControl {
            supported: true,
            refuse: vec![MediaActionKind::SeekTo],
            ..Default::default()
        };
        let bridge = MediaSessionBridge::install(&mut control, &MediaMetadata::default());

        assert!(bridge.handles(MediaActionKind::Stop));
        assert!(!bridge.handles(MediaActionKind::SeekTo));
        assert_eq!(bridge.registered().len(), 5);
    }

    #[test]
    fn default_metadata_offers_six_artwork_sizes() {
        let metadata = MediaMetadata::default();
        assert_eq!(metadata.artwork.len(), 6);
        assert_eq!(metadata.artwork[5].sizes, "512x512");

        let json = serde_json::to_value(&metadata.artwork[0]).unwrap();
        assert_eq!(json["type"], "image/png");
    }

    #[test]
    fn action_kind_names() {
        assert_eq!(
            MediaAction::SeekTo {
                time: 1.0,
                fast: false
            }
            .kind()
            .as_str(),
            "seekto"
        );
        assert_eq!(MediaAction::Stop.kind(), MediaActionKind::Stop);
    }
}
