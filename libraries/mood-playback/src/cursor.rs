//! Bidirectional cyclic navigation over fixed playlists
//!
//! A [`PlaylistCursor`] is an index plus a one-bit direction memory. The
//! first navigation (either way) moves one step away from a virtual "no
//! selection" position; same-direction calls step contiguously; a reversal
//! lands on the neighbour of the last track, never two steps away.
//!
//! [`CursorBank`] decides whether the three channels share one cursor or
//! each own one (see [`CursorSharing`]).

use crate::types::{Channel, CursorSharing, Playlist, TrackRef};
use serde::{Deserialize, Serialize};

/// Direction memory of a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Initial state, and the state after any `advance`
    ForwardPrimed,
    /// State after a `retreat`
    BackwardPrimed,
}

/// Position tracker for one or more playlists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistCursor {
    index: usize,
    first: bool,
}

impl PlaylistCursor {
    pub fn new() -> Self {
        Self {
            index: 0,
            first: true,
        }
    }

    /// Move forward one position and return the track there
    pub fn advance<'a>(&mut self, playlist: &'a Playlist) -> &'a TrackRef {
        let len = playlist.len();
        let index = self.index % len;

        if self.first {
            self.index = if index == len - 1 { 0 } else { index + 1 };
        } else {
            // Reversal right after a retreat: one step back toward where the
            // retreat came from.
            self.first = true;
            self.index = (index + 1) % len;
        }

        &playlist.tracks()[self.index]
    }

    /// Move backward one position and return the track there
    pub fn retreat<'a>(&mut self, playlist: &'a Playlist) -> &'a TrackRef {
        let len = playlist.len();
        let index = self.index % len;

        if self.first {
            self.first = false;
            self.index = index.checked_sub(1).unwrap_or(len - 1);
        } else {
            self.index = if index == 0 { len - 1 } else { index - 1 };
        }

        &playlist.tracks()[self.index]
    }

    /// Index of the most recently returned track
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        if self.first {
            Direction::ForwardPrimed
        } else {
            Direction::BackwardPrimed
        }
    }

    /// Return to the fresh state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PlaylistCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor storage for the three channels
#[derive(Debug, Clone)]
pub enum CursorBank {
    /// A single cursor reused by every channel
    Shared(PlaylistCursor),

    /// One cursor per channel, indexed by [`Channel::index`]
    PerChannel([PlaylistCursor; 3]),
}

impl CursorBank {
    pub fn new(sharing: CursorSharing) -> Self {
        match sharing {
            CursorSharing::Shared => CursorBank::Shared(PlaylistCursor::new()),
            CursorSharing::PerChannel => CursorBank::PerChannel([
                PlaylistCursor::new(),
                PlaylistCursor::new(),
                PlaylistCursor::new(),
            ]),
        }
    }

    pub fn sharing(&self) -> CursorSharing {
        match self {
            CursorBank::Shared(_) => CursorSharing::Shared,
            CursorBank::PerChannel(_) => CursorSharing::PerChannel,
        }
    }

    /// The cursor `channel` navigates with
    pub fn cursor(&self, channel: Channel) -> &PlaylistCursor {
        match self {
            CursorBank::Shared(cursor) => cursor,
            CursorBank::PerChannel(cursors) => &cursors[channel.index()],
        }
    }

    pub fn cursor_mut(&mut self, channel: Channel) -> &mut PlaylistCursor {
        match self {
            CursorBank::Shared(cursor) => cursor,
            CursorBank::PerChannel(cursors) => &mut cursors[channel.index()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(len: usize) -> Playlist {
        Playlist::new(
            "test",
            (0..len).map(|i| TrackRef::new(format!("track{i}"))).collect(),
        )
        .unwrap()
    }

    fn position(playlist: &Playlist, track: &TrackRef) -> usize {
        playlist.tracks().iter().position(|t| t == track).unwrap()
    }

    #[test]
    fn first_advance_lands_on_second_track() {
        let list = playlist(4);
        let mut cursor = PlaylistCursor::new();

        let track = cursor.advance(&list);
        assert_eq!(position(&list, track), 1);
        assert_eq!(cursor.direction(), Direction::ForwardPrimed);
    }

    #[test]
    fn first_retreat_wraps_to_last_track() {
        let list = playlist(4);
        let mut cursor = PlaylistCursor::new();

        let track = cursor.retreat(&list);
        assert_eq!(position(&list, track), 3);
        assert_eq!(cursor.direction(), Direction::BackwardPrimed);
    }

    #[test]
    fn retreat_after_advance_returns_to_previous_track() {
        let list = playlist(4);
        let mut cursor = PlaylistCursor::new();

        cursor.advance(&list);
        cursor.advance(&list);
        assert_eq!(cursor.index(), 2);

        let track = cursor.retreat(&list);
        assert_eq!(position(&list, track), 1);
    }

    #[test]
    fn advance_after_retreat_returns_to_next_track() {
        let list = playlist(4);
        let mut cursor = PlaylistCursor::new();

        cursor.retreat(&list); // 3
        cursor.retreat(&list); // 2
        let track = cursor.advance(&list);
        assert_eq!(position(&list, track), 3);
        assert_eq!(cursor.direction(), Direction::ForwardPrimed);
    }

    #[test]
    fn advance_cycles_with_period_of_playlist_length() {
        let list = playlist(4);
        let mut cursor = PlaylistCursor::new();

        let visited: Vec<usize> = (0..10)
            .map(|_| position(&list, cursor.advance(&list)))
            .collect();

        assert_eq!(visited, vec![1, 2, 3, 0, 1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn retreat_cycles_backward() {
        let list = playlist(3);
        let mut cursor = PlaylistCursor::new();

        let visited: Vec<usize> = (0..7)
            .map(|_| position(&list, cursor.retreat(&list)))
            .collect();

        assert_eq!(visited, vec![2, 1, 0, 2, 1, 0, 2]);
    }

    #[test]
    fn reversal_at_the_end_wraps_instead_of_overrunning() {
        let list = playlist(4);
        let mut cursor = PlaylistCursor::new();

        // Walk to the last slot backwards, then reverse.
        cursor.retreat(&list); // 3, backward-primed
        let track = cursor.advance(&list);
        assert_eq!(position(&list, track), 0);
    }

    #[test]
    fn single_track_playlist_always_returns_it() {
        let list = playlist(1);
        let mut cursor = PlaylistCursor::new();

        assert_eq!(position(&list, cursor.advance(&list)), 0);
        assert_eq!(position(&list, cursor.retreat(&list)), 0);
        assert_eq!(position(&list, cursor.retreat(&list)), 0);
        assert_eq!(position(&list, cursor.advance(&list)), 0);
    }

    #[test]
    fn index_is_reduced_for_shorter_playlist() {
        let long = playlist(6);
        let short = playlist(3);
        let mut cursor = PlaylistCursor::new();

        for _ in 0..5 {
            cursor.advance(&long);
        }
        assert_eq!(cursor.index(), 5);

        // 5 % 3 == 2, one step forward wraps to 0
        let track = cursor.advance(&short);
        assert_eq!(position(&short, track), 0);
    }

    #[test]
    fn shared_bank_carries_position_across_channels() {
        let epic = playlist(4);
        let cool = playlist(4);
        let mut bank = CursorBank::new(CursorSharing::Shared);

        bank.cursor_mut(Channel::Epic).advance(&epic); // 1
        bank.cursor_mut(Channel::Epic).advance(&epic); // 2
        let track = bank.cursor_mut(Channel::Cool).advance(&cool);

        assert_eq!(position(&cool, track), 3);
        assert_eq!(bank.cursor(Channel::Reflex).index(), 3);
    }

    #[test]
    fn shared_bank_shares_direction_memory() {
        let epic = playlist(4);
        let cool = playlist(4);
        let mut bank = CursorBank::new(CursorSharing::Shared);

        bank.cursor_mut(Channel::Epic).retreat(&epic);
        assert_eq!(
            bank.cursor(Channel::Cool).direction(),
            Direction::BackwardPrimed
        );

        let track = bank.cursor_mut(Channel::Cool).advance(&cool);
        assert_eq!(position(&cool, track), 0);
        assert_eq!(
            bank.cursor(Channel::Epic).direction(),
            Direction::ForwardPrimed
        );
    }

    #[test]
    fn per_channel_bank_isolates_channels() {
        let epic = playlist(4);
        let cool = playlist(4);
        let mut bank = CursorBank::new(CursorSharing::PerChannel);

        bank.cursor_mut(Channel::Epic).advance(&epic);
        bank.cursor_mut(Channel::Epic).advance(&epic);
        let track = bank.cursor_mut(Channel::Cool).advance(&cool);

        assert_eq!(position(&cool, track), 1);
        assert_eq!(bank.cursor(Channel::Epic).index(), 2);
        assert_eq!(bank.sharing(), CursorSharing::PerChannel);
    }

    #[test]
    fn reset_restores_fresh_behaviour() {
        let list = playlist(4);
        let mut cursor = PlaylistCursor::new();
        cursor.retreat(&list);
        cursor.retreat(&list);

        cursor.reset();
        assert_eq!(cursor, PlaylistCursor::new());
        assert_eq!(position(&list, cursor.advance(&list)), 1);
    }
}
