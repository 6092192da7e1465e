//! Property-based tests for navigation and display
//!
//! Uses proptest to verify invariants across many random inputs.

use mood_playback::{format_time, Playlist, PlaylistCursor, ProgressTracker, TrackRef, Volume};
use proptest::prelude::*;

// ===== Helpers =====

fn playlist_of(len: usize) -> Playlist {
    Playlist::new(
        "test",
        (0..len).map(|i| TrackRef::new(format!("{i}.mp3"))).collect(),
    )
    .unwrap()
}

fn index_of(track: &TrackRef) -> usize {
    track.title().parse().unwrap()
}

// ===== Property Tests =====

proptest! {
    /// Property: the cursor never points outside the playlist, even when
    /// consecutive calls use playlists of different lengths
    #[test]
    fn cursor_stays_in_bounds(
        ops in prop::collection::vec((any::<bool>(), 1usize..8), 1..100)
    ) {
        let mut cursor = PlaylistCursor::new();

        for (forward, len) in ops {
            let playlist = playlist_of(len);
            let track = if forward {
                cursor.advance(&playlist)
            } else {
                cursor.retreat(&playlist)
            };

            prop_assert!(cursor.index() < len);
            prop_assert_eq!(index_of(track), cursor.index());
        }
    }

    /// Property: `len` advances in a row visit every track exactly once
    #[test]
    fn advancing_visits_every_track(len in 1usize..12, warmup in 0usize..20) {
        let playlist = playlist_of(len);
        let mut cursor = PlaylistCursor::new();
        for _ in 0..warmup {
            cursor.advance(&playlist);
        }

        let mut seen = vec![false; len];
        for _ in 0..len {
            seen[index_of(cursor.advance(&playlist))] = true;
        }
        prop_assert!(seen.iter().all(|s| *s));
    }

    /// Property: a same-direction step after the first call moves exactly one
    /// position (mod len)
    #[test]
    fn consecutive_steps_are_contiguous(
        len in 2usize..10,
        ops in prop::collection::vec(any::<bool>(), 2..50)
    ) {
        let playlist = playlist_of(len);
        let mut cursor = PlaylistCursor::new();
        let mut previous: Option<(bool, usize)> = None;

        for forward in ops {
            let index = if forward {
                index_of(cursor.advance(&playlist))
            } else {
                index_of(cursor.retreat(&playlist))
            };

            if let Some((was_forward, last)) = previous {
                let expected = if forward { (last + 1) % len } else { (last + len - 1) % len };
                if was_forward == forward {
                    prop_assert_eq!(index, expected);
                }
            }
            previous = Some((forward, index));
        }
    }

    /// Property: formatted time is always `M:SS` with seconds below 60
    #[test]
    fn format_time_is_minutes_and_two_digit_seconds(secs in 0.0f64..100_000.0) {
        let text = format_time(secs);
        let (minutes, seconds) = text.split_once(':').unwrap();

        prop_assert_eq!(seconds.len(), 2);
        let minutes: u64 = minutes.parse().unwrap();
        let seconds: u64 = seconds.parse().unwrap();
        prop_assert!(seconds < 60);
        prop_assert_eq!(minutes * 60 + seconds, secs.floor() as u64);
    }

    /// Property: seek and buffered fills stay within 0-100% for in-range inputs
    #[test]
    fn fills_stay_in_percent_range(
        duration in 1.0f64..10_000.0,
        position_ratio in 0.0f64..=1.0,
        buffered_ratio in 0.0f64..=1.0
    ) {
        let mut tracker = ProgressTracker::new();
        tracker.apply_duration(duration);
        tracker.update_position(duration * position_ratio);
        tracker.update_buffered(duration * buffered_ratio);

        prop_assert!((0.0..=100.0).contains(&tracker.seek_fill_percent()));
        prop_assert!((0.0..=100.0).contains(&tracker.buffered_fill_percent()));
    }

    /// Property: volume gain is always within 0.0-1.0
    #[test]
    fn volume_gain_in_unit_range(level in any::<u8>()) {
        let volume = Volume::new(level);
        prop_assert!(volume.level() <= 100);
        prop_assert!((0.0..=1.0).contains(&volume.gain()));
    }
}
