//! Progress tracking for the seek bar and time display
//!
//! While playing, the session calls [`ProgressTracker::update_position`] once
//! per display-refresh tick and reschedules the next tick. The schedule is a
//! single pending [`TickToken`]; cancelling drops it, and a token that is no
//! longer pending is refused by [`ProgressTracker::fire`]. Buffered-range
//! updates are independent of the tick loop.

use crate::time::format_time;
use serde::{Deserialize, Serialize};

/// Ticket for one scheduled progress tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

/// Derived, per-tick view of playback progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Seek slider value (whole seconds)
    pub seek_value: f64,

    /// Seek slider maximum (whole seconds of duration, 0 before metadata)
    pub seek_max: f64,

    /// Elapsed part of the seek bar, in percent
    pub seek_fill_percent: f64,

    /// Buffered part of the seek bar, in percent
    pub buffered_fill_percent: f64,

    /// Elapsed time, `M:SS`
    pub current_time: String,

    /// Total time, `M:SS`
    pub duration: String,
}

/// Seek bar, buffered bar and time display state plus the tick schedule
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    pending: Option<TickToken>,
    next_token: u64,
    scrubbing: bool,
    seek_value: f64,
    seek_max: f64,
    seek_fill: f64,
    buffered_fill: f64,
    current_time: String,
    duration: String,
}

/// `value / max` in percent, 0 while the maximum is unknown
fn fill_percent(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max * 100.0
    } else {
        0.0
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            pending: None,
            next_token: 0,
            scrubbing: false,
            seek_value: 0.0,
            seek_max: 0.0,
            seek_fill: 0.0,
            buffered_fill: 0.0,
            current_time: format_time(0.0),
            duration: format_time(0.0),
        }
    }

    // ===== Tick schedule =====

    /// Schedule the next tick, replacing any pending one
    pub fn schedule(&mut self) -> TickToken {
        let token = TickToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        token
    }

    /// Drop the pending tick, if any
    pub fn cancel(&mut self) -> Option<TickToken> {
        self.pending.take()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<TickToken> {
        self.pending
    }

    /// Consume `token` if it is the pending tick
    ///
    /// Returns false for cancelled or superseded tokens.
    pub fn fire(&mut self, token: TickToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    // ===== Display updates =====

    /// Apply a tick's position reading
    pub fn update_position(&mut self, position_secs: f64) {
        self.seek_value = position_secs.max(0.0).floor();
        self.current_time = format_time(self.seek_value);
        self.seek_fill = fill_percent(self.seek_value, self.seek_max);
    }

    /// Apply metadata once duration is known
    pub fn apply_duration(&mut self, duration_secs: f64) {
        self.duration = format_time(duration_secs);
        self.seek_max = if duration_secs.is_finite() {
            duration_secs.max(0.0).floor()
        } else {
            0.0
        };
        self.seek_fill = fill_percent(self.seek_value, self.seek_max);
    }

    /// Apply the end of the furthest buffered range
    pub fn update_buffered(&mut self, buffered_end_secs: f64) {
        self.buffered_fill = fill_percent(buffered_end_secs.max(0.0).floor(), self.seek_max);
    }

    /// Seek display back to zero (position reset, not a new track)
    pub fn reset_position(&mut self) {
        self.seek_value = 0.0;
        self.seek_fill = 0.0;
        self.current_time = format_time(0.0);
    }

    /// Clear everything derived from the previous track
    pub fn reset_for_new_track(&mut self) {
        self.reset_position();
        self.cancel_scrub();
        self.seek_max = 0.0;
        self.buffered_fill = 0.0;
        self.duration = format_time(0.0);
    }

    // ===== Manual seeking =====

    /// The user is dragging the seek control to `value` seconds
    pub fn begin_scrub(&mut self, value: f64) {
        self.scrubbing = true;
        self.seek_value = value.max(0.0).floor();
        if self.seek_max > 0.0 {
            self.seek_value = self.seek_value.min(self.seek_max);
        }
        self.current_time = format_time(self.seek_value);
        self.seek_fill = fill_percent(self.seek_value, self.seek_max);
    }

    /// The user released the seek control; returns the committed position
    pub fn end_scrub(&mut self, value: f64) -> f64 {
        self.begin_scrub(value);
        self.scrubbing = false;
        self.seek_value
    }

    /// Abandon a drag without committing it
    pub fn cancel_scrub(&mut self) {
        self.scrubbing = false;
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    // ===== Queries =====

    pub fn seek_value(&self) -> f64 {
        self.seek_value
    }

    pub fn seek_max(&self) -> f64 {
        self.seek_max
    }

    pub fn seek_fill_percent(&self) -> f64 {
        self.seek_fill
    }

    pub fn buffered_fill_percent(&self) -> f64 {
        self.buffered_fill
    }

    pub fn current_time(&self) -> &str {
        &self.current_time
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            seek_value: self.seek_value,
            seek_max: self.seek_max,
            seek_fill_percent: self.seek_fill,
            buffered_fill_percent: self.buffered_fill,
            current_time: self.current_time.clone(),
            duration: self.duration.clone(),
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
