//! Countdown/stopwatch timer model
//!
//! - [`model`]: the timer itself (value, chrono mode, editing, play/pause)
//! - [`record`]: the persisted form

pub mod model;
pub mod record;

pub use model::{RunState, TimeParts, Timer, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
pub use record::{TimerRecord, TIMER_RECORD_VERSION};

use crate::traits::VibePattern;

/// How long the expiry alarm keeps buzzing
pub const ALARM_WINDOW_MS: u32 = 20_000;

/// One buzz cycle: on, off, on, off
const ALARM_CYCLE: [u32; 4] = [400, 200, 600, 800];

const ALARM_CYCLE_MS: u32 = 400 + 200 + 600 + 800;

const ALARM_SEGMENT_COUNT: usize = (ALARM_WINDOW_MS / ALARM_CYCLE_MS) as usize * ALARM_CYCLE.len();

const ALARM_SEGMENTS: [u32; ALARM_SEGMENT_COUNT] = {
    let mut segments = [0; ALARM_SEGMENT_COUNT];
    let mut i = 0;
    while i < ALARM_SEGMENT_COUNT {
        segments[i] = ALARM_CYCLE[i % ALARM_CYCLE.len()];
        i += 1;
    }
    segments
};

/// Vibration played when a countdown expires
pub const ALARM_PATTERN: VibePattern = VibePattern::new(&ALARM_SEGMENTS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_pattern_fills_window() {
        assert_eq!(ALARM_PATTERN.segments.len(), 40);
        assert_eq!(ALARM_PATTERN.total_ms(), ALARM_WINDOW_MS);
        assert_eq!(&ALARM_PATTERN.segments[..4], &ALARM_CYCLE);
    }
}
