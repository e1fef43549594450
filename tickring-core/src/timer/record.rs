//! Persisted timer state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current record layout version
pub const TIMER_RECORD_VERSION: u8 = 2;

/// Timer state as written to flash
///
/// Run time is stored relative to the timer itself rather than to the
/// clock, so a record survives a reboot that restarts the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerRecord {
    pub version: u8,
    pub length_ms: i64,
    pub run_ms: i64,
    pub running: bool,
    pub elapsed: bool,
}
