//! Volume control with mute memory
//!
//! Volume range is 0-100%, applied linearly to the media element.
//! Muting sets the level to 0 and remembers the previous level.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100); 0 means muted
    level: u8,

    /// Level to restore on unmute
    last_level: u8,

    /// Restored when the remembered level is 0
    fallback: u8,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0-100), also the unmute fallback
    pub fn new(level: u8) -> Self {
        let level = level.min(100);
        Self {
            level,
            last_level: level,
            fallback: level,
        }
    }

    /// Set volume level, clamping to 0-100
    pub fn set_level(&mut self, level: i32) {
        self.level = level.clamp(0, 100) as u8;
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.level == 0
    }

    /// Toggle mute state
    ///
    /// Muting remembers the current level. Unmuting restores it, or the
    /// fallback level when the remembered one is 0.
    pub fn toggle_mute(&mut self) {
        if self.level > 0 {
            self.last_level = self.level;
            self.level = 0;
        } else if self.last_level > 0 {
            self.level = self.last_level;
        } else {
            self.level = self.fallback;
        }
    }

    /// Linear gain for the media element (0.0 to 1.0)
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(70);
        assert_eq!(vol.level(), 70);
        assert!(!vol.is_muted());
        assert!((vol.gain() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn set_level_clamps() {
        let mut vol = Volume::default();
        vol.set_level(150);
        assert_eq!(vol.level(), 100);
        vol.set_level(-5);
        assert_eq!(vol.level(), 0);
        assert!(vol.is_muted());
    }

    #[test]
    fn mute_restores_previous_level() {
        let mut vol = Volume::new(70);
        vol.set_level(40);

        vol.toggle_mute();
        assert!(vol.is_muted());
        assert_eq!(vol.gain(), 0.0);

        vol.toggle_mute();
        assert_eq!(vol.level(), 40);
    }

    #[test]
    fn unmute_from_dragged_zero_uses_last_muted_level() {
        let mut vol = Volume::new(70);
        vol.set_level(55);
        vol.toggle_mute();
        vol.toggle_mute();

        // Dragged to zero rather than muted: last remembered level is still 55
        vol.set_level(0);
        vol.toggle_mute();
        assert_eq!(vol.level(), 55);
    }

    #[test]
    fn unmute_falls_back_to_initial_level() {
        let mut vol = Volume::new(0);
        vol.toggle_mute();
        assert_eq!(vol.level(), 0);

        let mut vol = Volume::new(70);
        vol.last_level = 0;
        vol.set_level(0);
        vol.toggle_mute();
        assert_eq!(vol.level(), 70);
    }
}
