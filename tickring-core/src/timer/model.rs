//! Countdown timer that keeps counting up once it expires
//!
//! The displayed value is `length - run`. While that is positive the
//! timer counts down; once it crosses zero the face shows the absolute
//! value and the timer behaves as a stopwatch ("chrono" mode).

use super::record::{TimerRecord, TIMER_RECORD_VERSION};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Hours, minutes and seconds of the displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeParts {
    pub hours: u16,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeParts {
    pub fn from_ms(value_ms: u64) -> Self {
        let hours = value_ms / MS_PER_HOUR as u64;
        Self {
            hours: hours.min(u16::MAX as u64) as u16,
            minutes: (value_ms % MS_PER_HOUR as u64 / MS_PER_MINUTE as u64) as u8,
            seconds: (value_ms % MS_PER_MINUTE as u64 / MS_PER_SECOND as u64) as u8,
        }
    }
}

/// Whether the timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Stopped after running for `run_ms`
    Paused { run_ms: i64 },
    /// Running since the clock read `started_ms`
    Running { started_ms: i64 },
}

/// Countdown/stopwatch timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    length_ms: i64,
    run: RunState,
    /// Set once the expiry has been announced
    elapsed: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// A zeroed, paused timer with the expiry already acknowledged
    pub const fn new() -> Self {
        Self {
            length_ms: 0,
            run: RunState::Paused { run_ms: 0 },
            elapsed: true,
        }
    }

    /// A paused countdown of `length_ms`
    pub const fn with_length(length_ms: i64) -> Self {
        Self {
            length_ms,
            run: RunState::Paused { run_ms: 0 },
            elapsed: false,
        }
    }

    pub fn length_ms(&self) -> i64 {
        self.length_ms
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.run, RunState::Paused { .. })
    }

    /// Time spent running so far
    pub fn run_ms(&self, now_ms: u64) -> i64 {
        match self.run {
            RunState::Paused { run_ms } => run_ms,
            RunState::Running { started_ms } => now_ms as i64 - started_ms,
        }
    }

    /// Signed value: positive while counting down, negative past expiry
    pub fn raw_value_ms(&self, now_ms: u64) -> i64 {
        self.length_ms - self.run_ms(now_ms)
    }

    /// Displayed value
    pub fn value_ms(&self, now_ms: u64) -> u64 {
        self.raw_value_ms(now_ms).unsigned_abs()
    }

    pub fn time_parts(&self, now_ms: u64) -> TimeParts {
        TimeParts::from_ms(self.value_ms(now_ms))
    }

    /// Check whether the timer shows stopwatch time
    ///
    /// The last partial second of a countdown already counts as chrono, so
    /// the face never shows "0:00" counting down.
    pub fn is_chrono(&self, now_ms: u64) -> bool {
        self.raw_value_ms(now_ms) / MS_PER_SECOND <= 0
    }

    /// Check whether the expiry alarm should be playing
    pub fn is_vibrating(&self, now_ms: u64, alarm_window_ms: u32) -> bool {
        self.is_chrono(now_ms)
            && !self.is_paused()
            && self.value_ms(now_ms) < alarm_window_ms as u64
    }

    /// Latch the expiry
    ///
    /// Returns `true` only on the first call after a running countdown
    /// crosses zero; the caller starts the alarm.
    pub fn check_elapsed(&mut self, now_ms: u64) -> bool {
        if self.is_chrono(now_ms) && !self.is_paused() && !self.elapsed {
            self.elapsed = true;
            return true;
        }
        false
    }

    /// Adjust the value being edited by `delta_ms`
    ///
    /// The changed field wraps without carrying: seconds wrap within a
    /// minute, minutes within an hour, hours within 100 hours. A stopwatch
    /// that has run is instead returned to its original countdown.
    pub fn increment(&mut self, delta_ms: i64, now_ms: u64) {
        if self.is_chrono(now_ms) && self.run != (RunState::Paused { run_ms: 0 }) {
            self.run = RunState::Paused { run_ms: 0 };
            self.elapsed = false;
            return;
        }

        let interval = if delta_ms.abs() < MS_PER_MINUTE {
            MS_PER_MINUTE
        } else if delta_ms.abs() < MS_PER_HOUR {
            MS_PER_HOUR
        } else {
            MS_PER_HOUR * 100
        };

        let low = self.raw_value_ms(now_ms) % interval;
        let step = (low + interval + delta_ms) % interval - low;

        match self.run {
            RunState::Paused { run_ms: 0 } => self.length_ms += step,
            RunState::Paused { run_ms } => {
                let run = run_ms - step;
                if run < 0 {
                    self.length_ms -= run;
                    self.run = RunState::Paused { run_ms: 0 };
                } else {
                    self.run = RunState::Paused { run_ms: run };
                }
            }
            RunState::Running { started_ms } => {
                let started = started_ms + step;
                let run = now_ms as i64 - started;
                if run < 0 {
                    self.length_ms -= run;
                    self.run = RunState::Running {
                        started_ms: now_ms as i64,
                    };
                } else {
                    self.run = RunState::Running { started_ms: started };
                }
            }
        }
        self.elapsed = false;
    }

    /// Start a paused timer or pause a running one
    pub fn toggle_play_pause(&mut self, now_ms: u64) {
        self.run = match self.run {
            RunState::Running { started_ms } => RunState::Paused {
                run_ms: now_ms as i64 - started_ms,
            },
            RunState::Paused { run_ms } => RunState::Running {
                started_ms: now_ms as i64 - run_ms,
            },
        };
    }

    /// Return to the original countdown and re-arm the alarm
    pub fn rewind(&mut self) {
        self.run = RunState::Paused { run_ms: 0 };
        self.elapsed = false;
    }

    /// Zero the timer; a zero-length timer never raises the alarm
    pub fn reset(&mut self) {
        self.length_ms = 0;
        self.run = RunState::Paused { run_ms: 0 };
        self.elapsed = true;
    }

    /// Delay until the displayed seconds next change, at least 1 ms
    pub fn ms_until_next_second(&self, now_ms: u64) -> u32 {
        let into_second = (self.value_ms(now_ms) % MS_PER_SECOND as u64) as u32;
        let wait = if self.is_chrono(now_ms) {
            MS_PER_SECOND as u32 - into_second
        } else {
            into_second
        };
        wait + 1
    }

    /// Snapshot for persistent storage
    pub fn to_record(&self, now_ms: u64) -> TimerRecord {
        TimerRecord {
            version: TIMER_RECORD_VERSION,
            length_ms: self.length_ms,
            run_ms: self.run_ms(now_ms),
            running: !self.is_paused(),
            elapsed: self.elapsed,
        }
    }

    /// Rebuild a timer from storage
    ///
    /// A running timer resumes from `now_ms` with the run time it had when
    /// stored. Records from another format version are rejected.
    pub fn from_record(record: &TimerRecord, now_ms: u64) -> Option<Self> {
        if record.version != TIMER_RECORD_VERSION {
            return None;
        }
        let run = if record.running {
            RunState::Running {
                started_ms: now_ms as i64 - record.run_ms,
            }
        } else {
            RunState::Paused {
                run_ms: record.run_ms,
            }
        };
        Some(Self {
            length_ms: record.length_ms,
            run,
            elapsed: record.elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_minutes() -> Timer {
        Timer::with_length(5 * MS_PER_MINUTE)
    }

    #[test]
    fn test_new_timer_is_zeroed_chrono() {
        let t = Timer::new();
        assert_eq!(t.value_ms(1234), 0);
        assert!(t.is_paused());
        assert!(t.is_chrono(1234));
    }

    #[test]
    fn test_countdown_runs_while_started() {
        let mut t = five_minutes();
        t.toggle_play_pause(10_000);
        assert!(!t.is_paused());
        assert_eq!(t.value_ms(70_000), 4 * MS_PER_MINUTE as u64);

        t.toggle_play_pause(70_000);
        assert!(t.is_paused());
        assert_eq!(t.value_ms(500_000), 4 * MS_PER_MINUTE as u64);

        t.toggle_play_pause(500_000);
        assert_eq!(t.value_ms(530_000), 210_000);
    }

    #[test]
    fn test_turns_into_stopwatch_after_expiry() {
        let mut t = Timer::with_length(10_000);
        t.toggle_play_pause(0);

        assert!(!t.is_chrono(8_999));
        assert!(t.is_chrono(9_001));
        assert_eq!(t.value_ms(15_000), 5_000);
        assert_eq!(t.raw_value_ms(15_000), -5_000);
        assert!(t.is_chrono(15_000));
    }

    #[test]
    fn test_check_elapsed_fires_once() {
        let mut t = Timer::with_length(10_000);
        t.toggle_play_pause(0);

        assert!(!t.check_elapsed(5_000));
        assert!(t.check_elapsed(10_000));
        assert!(!t.check_elapsed(11_000));

        t.rewind();
        t.toggle_play_pause(20_000);
        assert!(t.check_elapsed(30_000));
    }

    #[test]
    fn test_reset_timer_never_alarms() {
        let mut t = five_minutes();
        t.reset();
        t.toggle_play_pause(0);
        assert!(!t.check_elapsed(1_000));
    }

    #[test]
    fn test_vibrating_window() {
        let mut t = Timer::with_length(10_000);
        t.toggle_play_pause(0);

        assert!(!t.is_vibrating(5_000, 20_000));
        assert!(t.is_vibrating(12_000, 20_000));
        assert!(!t.is_vibrating(31_000, 20_000));

        t.toggle_play_pause(12_000);
        assert!(!t.is_vibrating(12_000, 20_000));
    }

    #[test]
    fn test_increment_seconds_wraps_within_minute() {
        let mut t = Timer::with_length(MS_PER_MINUTE + 59 * MS_PER_SECOND);
        t.increment(MS_PER_SECOND, 0);
        assert_eq!(t.length_ms(), MS_PER_MINUTE);

        t.increment(-MS_PER_SECOND, 0);
        assert_eq!(t.length_ms(), MS_PER_MINUTE + 59 * MS_PER_SECOND);
    }

    #[test]
    fn test_increment_minutes_wraps_within_hour() {
        let mut t = Timer::new();
        t.increment(-MS_PER_MINUTE, 0);
        assert_eq!(t.length_ms(), 59 * MS_PER_MINUTE);

        t.increment(MS_PER_MINUTE, 0);
        assert_eq!(t.length_ms(), 0);
    }

    #[test]
    fn test_increment_hours() {
        let mut t = Timer::with_length(30 * MS_PER_MINUTE);
        t.increment(MS_PER_HOUR, 0);
        assert_eq!(t.time_parts(0), TimeParts { hours: 1, minutes: 30, seconds: 0 });

        let mut t = Timer::new();
        t.increment(-MS_PER_HOUR, 0);
        assert_eq!(t.time_parts(0).hours, 99);
    }

    #[test]
    fn test_increment_partially_run_countdown() {
        let mut t = five_minutes();
        t.toggle_play_pause(0);
        t.toggle_play_pause(90_000); // 3:30 left, paused

        t.increment(MS_PER_MINUTE, 90_000);
        assert_eq!(t.value_ms(90_000), 270_000);

        // Pushing the value past the original length folds the run into it
        t.increment(MS_PER_MINUTE, 90_000);
        t.increment(MS_PER_MINUTE, 90_000);
        assert_eq!(t.value_ms(90_000), 390_000);
        assert_eq!(t.run_state(), RunState::Paused { run_ms: 0 });
        assert_eq!(t.length_ms(), 390_000);
    }

    #[test]
    fn test_increment_on_used_stopwatch_rewinds() {
        let mut t = Timer::with_length(10_000);
        t.toggle_play_pause(0);
        t.toggle_play_pause(25_000);
        assert!(t.is_chrono(25_000));

        t.increment(MS_PER_SECOND, 25_000);
        assert_eq!(t.value_ms(25_000), 10_000);
        assert!(t.is_paused());
    }

    #[test]
    fn test_ms_until_next_second() {
        let mut t = Timer::with_length(10_000);
        t.toggle_play_pause(0);
        // Counting down: 9.7 s shown, seconds change in 700 ms
        assert_eq!(t.ms_until_next_second(300), 701);
        // Counting up: 2.3 s shown, next change in 700 ms
        assert_eq!(t.ms_until_next_second(12_300), 701);
    }

    #[test]
    fn test_record_restores_paused_timer() {
        let mut t = five_minutes();
        t.toggle_play_pause(0);
        t.toggle_play_pause(60_000);

        let record = t.to_record(60_000);
        let restored = Timer::from_record(&record, 999_999).unwrap();
        assert_eq!(restored, t);
    }

    #[test]
    fn test_record_reanchors_running_timer() {
        let mut t = five_minutes();
        t.toggle_play_pause(1_000);

        let record = t.to_record(61_000);
        assert!(record.running);
        assert_eq!(record.run_ms, 60_000);

        // Restored on a clock that restarted from zero
        let restored = Timer::from_record(&record, 500).unwrap();
        assert_eq!(restored.value_ms(500), 4 * MS_PER_MINUTE as u64);
        assert!(!restored.is_paused());
    }

    #[test]
    fn test_record_version_mismatch() {
        let mut record = five_minutes().to_record(0);
        record.version = TIMER_RECORD_VERSION + 1;
        assert!(Timer::from_record(&record, 0).is_none());
    }
}
