//! Player Events
//!
//! Event-based communication for UI synchronization. The session queues
//! events as transitions happen; the host drains them once per frame (or
//! after each input) and updates whatever it renders.

use crate::types::{Channel, HandleId, MuteState, NavAction, PlayState};
use serde::{Deserialize, Serialize};

/// Events emitted by a player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Play/pause state changed
    PlayStateChanged { state: PlayState },

    /// Mute state changed
    MuteChanged { state: MuteState },

    /// Volume level changed (0-100)
    VolumeChanged { level: u8 },

    /// A channel button was activated
    ChannelSelected {
        channel: Channel,
        action: NavAction,
        /// Index of the chosen track within the channel's playlist
        index: usize,
    },

    /// A new Active Track Handle replaced the previous one
    TrackChanged {
        handle: HandleId,
        /// Locator of the new track
        track: String,
        /// Handle that was released, if any
        previous: Option<HandleId>,
    },

    /// Metadata gate opened: duration and seek bounds are now valid
    MetadataApplied {
        handle: HandleId,
        duration_secs: f64,
    },

    /// Progress tick or seek moved the displayed position
    PositionUpdate {
        position_secs: f64,
        duration_secs: Option<f64>,
    },

    /// Buffered-range fill changed
    BufferedChanged { percent: f64 },

    /// System stop command reset the position
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = PlayerEvent::ChannelSelected {
            channel: Channel::Reflex,
            action: NavAction::Retreat,
            index: 3,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "channel_selected");
        assert_eq!(json["channel"], "reflex");
        assert_eq!(json["action"], "retreat");
        assert_eq!(json["index"], 3);
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = PlayerEvent::TrackChanged {
            handle: HandleId(4),
            track: "a.mp3".to_string(),
            previous: Some(HandleId(3)),
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: PlayerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
