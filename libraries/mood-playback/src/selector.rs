//! Channel selection visuals
//!
//! Each channel button has a lit/unlit image. Hovering lights a button and
//! leaving unlights it, except for the active channel, which stays lit until
//! another channel is selected.

use crate::types::Channel;
use serde::{Deserialize, Serialize};

/// Visual state of one channel button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelVisual {
    /// Showing the "on" image
    pub lit: bool,

    /// Selected channel
    pub active: bool,
}

impl ChannelVisual {
    const IDLE: ChannelVisual = ChannelVisual {
        lit: false,
        active: false,
    };
}

/// Selection and hover state of the three channel buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSelector {
    visuals: [ChannelVisual; 3],
    active: Option<Channel>,
    label: String,
}

impl PlaylistSelector {
    pub fn new() -> Self {
        Self {
            visuals: [ChannelVisual::IDLE; 3],
            active: None,
            label: String::new(),
        }
    }

    /// Mark `channel` active and the others inactive, and set the label
    pub fn select(&mut self, channel: Channel, playlist_name: &str) {
        for other in Channel::ALL {
            self.visuals[other.index()] = if other == channel {
                ChannelVisual {
                    lit: true,
                    active: true,
                }
            } else {
                ChannelVisual::IDLE
            };
        }
        self.active = Some(channel);
        self.label = format!("{playlist_name} playlist");
    }

    /// Pointer entered the button
    pub fn pointer_enter(&mut self, channel: Channel) {
        self.visuals[channel.index()].lit = true;
    }

    /// Pointer left the button; the active channel ignores this
    pub fn pointer_leave(&mut self, channel: Channel) {
        let visual = &mut self.visuals[channel.index()];
        if !visual.active {
            visual.lit = false;
        }
    }

    pub fn active(&self) -> Option<Channel> {
        self.active
    }

    pub fn visual(&self, channel: Channel) -> ChannelVisual {
        self.visuals[channel.index()]
    }

    /// Playlist-name label, empty before the first selection
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for PlaylistSelector {
    fn default() -> Self {
        Self::new()
    }
}
