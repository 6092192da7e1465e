//! Icon animation contract
//!
//! The play and mute buttons are vector animations. The session only ever
//! plays fixed frame segments of them; rendering is the host's job.

/// Inclusive frame range of an icon animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: u32,
    pub to: u32,
}

impl Segment {
    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }
}

/// Play icon morphing into the "paused" visual
pub const PAUSED_SEGMENT: Segment = Segment::new(0, 14);

/// Play icon morphing into the "playing" visual
pub const PLAYING_SEGMENT: Segment = Segment::new(14, 27);

/// Frame the play icon rests on at startup (paused visual)
pub const PAUSED_REST_FRAME: u32 = 14;

/// Mute icon morphing into the "muted" visual
pub const MUTED_SEGMENT: Segment = Segment::new(0, 15);

/// Mute icon morphing into the "unmuted" visual
pub const UNMUTED_SEGMENT: Segment = Segment::new(15, 25);

/// Renders icon transitions
pub trait AnimationPlayer {
    /// Play `segment` immediately, interrupting any running segment
    fn play_segment(&mut self, segment: Segment);

    /// Jump to `frame` and hold it
    fn jump_to(&mut self, frame: u32);
}

/// Animation player that renders nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimation;

impl AnimationPlayer for NoAnimation {
    fn play_segment(&mut self, _segment: Segment) {}

    fn jump_to(&mut self, _frame: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_segments_are_contiguous() {
        assert_eq!(PAUSED_SEGMENT.to, PLAYING_SEGMENT.from);
        assert_eq!(PAUSED_REST_FRAME, PAUSED_SEGMENT.to);
    }

    #[test]
    fn mute_segments_are_contiguous() {
        assert_eq!(MUTED_SEGMENT.to, UNMUTED_SEGMENT.from);
        assert_eq!(UNMUTED_SEGMENT, Segment::new(15, 25));
    }
}
