//! Volume level and mute flag
//!
//! The level is an integer percentage as shown on the volume slider. The
//! engine receives it as a linear `0.0..=1.0` gain. Muting is independent
//! of the level, so unmuting restores whatever level was set.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller; `level` is clamped to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Toggle mute state, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain handed to the engine (`level / 100`)
    ///
    /// Mute is applied by the engine's own muted flag, not folded in here.
    pub fn gain(&self) -> f64 {
        f64::from(self.level) / 100.0
    }

    /// Fill proportion of the volume slider, in percent
    pub fn fill_percent(&self) -> f64 {
        f64::from(self.level)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(80);
        assert_eq!(vol.level(), 80);
        assert!(!vol.is_muted());
    }

    #[test]
    fn set_volume_level_clamps() {
        let mut vol = Volume::new(50);
        vol.set_level(75);
        assert_eq!(vol.level(), 75);

        vol.set_level(150);
        assert_eq!(vol.level(), 100);

        assert_eq!(Volume::new(200).level(), 100);
    }

    #[test]
    fn toggle_mute_preserves_level() {
        let mut vol = Volume::new(80);

        assert!(vol.toggle_mute());
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 80);

        assert!(!vol.toggle_mute());
        assert_eq!(vol.level(), 80);
    }

    #[test]
    fn gain_is_linear() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert_eq!(Volume::new(50).gain(), 0.5);
        assert_eq!(Volume::new(100).gain(), 1.0);
    }

    #[test]
    fn muting_does_not_change_gain() {
        let mut vol = Volume::new(30);
        vol.set_muted(true);
        assert_eq!(vol.gain(), 0.3);
        assert_eq!(vol.fill_percent(), 30.0);
    }
}
