//! Vibration motor driver
//!
//! Plays a [`VibePattern`] on a motor that is simply switched on and off.
//! Even segments are "on", odd segments "off".
//!
//! # Usage
//!
//! ```ignore
//! let mut motor = VibeMotor::new();
//! motor.vibrate(ALARM_PATTERN);
//!
//! // Periodically:
//! let on = motor.update_with_delta(elapsed_ms);
//! pin.set_state(on);
//! ```

use tickring_core::traits::{Haptics, VibePattern};

/// Pattern-playing vibration motor
#[derive(Debug, Clone, Default)]
pub struct VibeMotor {
    pattern: Option<VibePattern>,
    /// Index of the segment being played
    segment: usize,
    /// Time spent in the current segment
    segment_elapsed_ms: u32,
}

impl VibeMotor {
    pub const fn new() -> Self {
        Self {
            pattern: None,
            segment: 0,
            segment_elapsed_ms: 0,
        }
    }

    /// Check if a pattern is playing
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Motor pin state (true = on)
    pub fn pin_state(&self) -> bool {
        self.pattern.is_some() && self.segment % 2 == 0
    }

    /// Time until the pin state may change, or `None` when idle
    pub fn remaining_in_segment_ms(&self) -> Option<u32> {
        let pattern = self.pattern?;
        let length = *pattern.segments.get(self.segment)?;
        Some(length.saturating_sub(self.segment_elapsed_ms))
    }

    /// Advance playback by `delta_ms` and return the pin state
    pub fn update_with_delta(&mut self, delta_ms: u32) -> bool {
        let Some(pattern) = self.pattern else {
            return false;
        };

        self.segment_elapsed_ms = self.segment_elapsed_ms.saturating_add(delta_ms);
        while let Some(&length) = pattern.segments.get(self.segment) {
            if self.segment_elapsed_ms < length {
                break;
            }
            self.segment_elapsed_ms -= length;
            self.segment += 1;
        }

        if self.segment >= pattern.segments.len() {
            self.stop();
        }
        self.pin_state()
    }

    fn stop(&mut self) {
        self.pattern = None;
        self.segment = 0;
        self.segment_elapsed_ms = 0;
    }
}

impl Haptics for VibeMotor {
    fn vibrate(&mut self, pattern: VibePattern) {
        self.stop();
        if !pattern.segments.is_empty() {
            self.pattern = Some(pattern);
        }
    }

    fn cancel(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickring_core::timer::ALARM_PATTERN;

    const SHORT: VibePattern = VibePattern::new(&[100, 50, 200]);

    #[test]
    fn test_idle_motor_is_off() {
        let mut motor = VibeMotor::new();
        assert!(!motor.is_active());
        assert!(!motor.update_with_delta(1000));
        assert_eq!(motor.remaining_in_segment_ms(), None);
    }

    #[test]
    fn test_plays_segments_in_order() {
        let mut motor = VibeMotor::new();
        motor.vibrate(SHORT);
        assert!(motor.pin_state());

        assert!(motor.update_with_delta(99));
        assert!(!motor.update_with_delta(1)); // off segment
        assert_eq!(motor.remaining_in_segment_ms(), Some(50));
        assert!(motor.update_with_delta(50)); // second on segment
        assert!(motor.update_with_delta(199));
        assert!(!motor.update_with_delta(1));
        assert!(!motor.is_active());
    }

    #[test]
    fn test_large_delta_skips_segments() {
        let mut motor = VibeMotor::new();
        motor.vibrate(SHORT);
        assert!(motor.update_with_delta(160)); // 10 ms into the last "on"
        assert_eq!(motor.remaining_in_segment_ms(), Some(190));
    }

    #[test]
    fn test_cancel_stops_immediately() {
        let mut motor = VibeMotor::new();
        motor.vibrate(ALARM_PATTERN);
        motor.update_with_delta(150);
        motor.cancel();
        assert!(!motor.pin_state());
        assert!(!motor.is_active());
    }

    #[test]
    fn test_alarm_pattern_runs_for_window() {
        let mut motor = VibeMotor::new();
        motor.vibrate(ALARM_PATTERN);

        let mut on_ms = 0;
        for _ in 0..(ALARM_PATTERN.total_ms() / 10) {
            if motor.update_with_delta(10) {
                on_ms += 10;
            }
        }
        assert!(!motor.is_active());
        // 400 + 600 on per 2 s cycle, minus the first 10 ms step counted after advancing
        assert!(on_ms >= 9_900 && on_ms <= 10_000, "on for {} ms", on_ms);
    }

    #[test]
    fn test_empty_pattern_is_ignored() {
        let mut motor = VibeMotor::new();
        motor.vibrate(VibePattern::new(&[]));
        assert!(!motor.is_active());
    }
}
