//! Configuration type definitions
//!
//! These types represent the watch configuration. Every field has a working
//! default so a blank or partial config still boots.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::animation::DEFAULT_TICK_INTERVAL_MS;
use crate::timer::ALARM_WINDOW_MS;

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Animation timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationConfig {
    /// Scheduler tick interval (ms)
    pub tick_interval_ms: u32,
    /// Progress ring catch-up duration (ms)
    pub progress_ms: u32,
    /// Smallest ring change that is animated rather than set (angle units)
    pub progress_jump_threshold: u16,
    /// Digit bounce duration (ms)
    pub bounce_ms: u32,
    /// Digit bounce displacement (px)
    pub bounce_px: u8,
    /// Ring reopen duration after a reset (ms)
    pub reset_ms: u32,
    /// Pause before the ring reopens (ms)
    pub reset_delay_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            progress_ms: 300,
            progress_jump_threshold: 0x0400,
            bounce_ms: 150,
            bounce_px: 4,
            reset_ms: 400,
            reset_delay_ms: 150,
        }
    }
}

/// Button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Pin sampling period (ms)
    pub poll_ms: u32,
    /// Level must be stable this long to count (ms)
    pub debounce_ms: u32,
    /// Hold time before Up/Down start repeating (ms)
    pub repeat_delay_ms: u32,
    /// Interval between repeats while held (ms)
    pub repeat_ms: u32,
    /// Hold time for a Select long press (ms)
    pub long_press_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            poll_ms: 10,
            debounce_ms: 20,
            repeat_delay_ms: 400,
            repeat_ms: 100,
            long_press_ms: 750,
        }
    }
}

/// Expiry alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlarmConfig {
    /// Vibrate when a countdown expires
    pub enabled: bool,
    /// How long after expiry a button press silences and rewinds (ms)
    pub window_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_ms: ALARM_WINDOW_MS,
        }
    }
}

/// Panel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Panel contrast (0-255)
    pub contrast: u8,
    /// Swap light and dark
    pub inverted: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            contrast: 0xCF,
            inverted: false,
        }
    }
}

/// Complete watch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchConfig {
    /// Layout version
    pub version: u8,
    pub animation: AnimationConfig,
    pub buttons: ButtonConfig,
    pub alarm: AlarmConfig,
    pub display: DisplayConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            animation: AnimationConfig::default(),
            buttons: ButtonConfig::default(),
            alarm: AlarmConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigIssue {
    /// Tick interval must be non-zero
    ZeroTickInterval,
    /// Button poll and repeat periods must be non-zero
    ZeroButtonPeriod,
    /// Long press must be longer than the debounce time
    LongPressTooShort,
    /// Unknown layout version
    UnsupportedVersion,
}

impl WatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the values the firmware divides by or compares against
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigIssue::UnsupportedVersion);
        }
        if self.animation.tick_interval_ms == 0 {
            return Err(ConfigIssue::ZeroTickInterval);
        }
        if self.buttons.poll_ms == 0 || self.buttons.repeat_ms == 0 {
            return Err(ConfigIssue::ZeroButtonPeriod);
        }
        if self.buttons.long_press_ms <= self.buttons.debounce_ms {
            return Err(ConfigIssue::LongPressTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WatchConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.animation.tick_interval_ms, 30);
        assert_eq!(config.buttons.repeat_ms, 100);
        assert_eq!(config.buttons.long_press_ms, 750);
        assert_eq!(config.alarm.window_ms, 20_000);
    }

    #[test]
    fn test_validate_rejects_zero_periods() {
        let mut config = WatchConfig::default();
        config.animation.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigIssue::ZeroTickInterval));

        let mut config = WatchConfig::default();
        config.buttons.poll_ms = 0;
        assert_eq!(config.validate(), Err(ConfigIssue::ZeroButtonPeriod));
    }

    #[test]
    fn test_validate_rejects_short_long_press() {
        let mut config = WatchConfig::default();
        config.buttons.long_press_ms = config.buttons.debounce_ms;
        assert_eq!(config.validate(), Err(ConfigIssue::LongPressTooShort));
    }

    #[test]
    fn test_validate_rejects_version() {
        let config = WatchConfig {
            version: CONFIG_VERSION + 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigIssue::UnsupportedVersion));
    }
}
