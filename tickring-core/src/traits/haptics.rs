//! Vibration motor interface

/// Alternating on/off durations in milliseconds, starting with "on"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VibePattern {
    pub segments: &'static [u32],
}

impl VibePattern {
    pub const fn new(segments: &'static [u32]) -> Self {
        Self { segments }
    }

    /// Total length of the pattern
    pub fn total_ms(&self) -> u32 {
        self.segments.iter().fold(0u32, |acc, s| acc.saturating_add(*s))
    }

    /// The leading segments that finish within `max_ms`
    pub fn truncated(self, max_ms: u32) -> Self {
        let mut total = 0u32;
        let mut end = 0;
        for segment in self.segments {
            total = total.saturating_add(*segment);
            if total > max_ms {
                break;
            }
            end += 1;
        }
        Self {
            segments: &self.segments[..end],
        }
    }
}

/// Haptic feedback
pub trait Haptics {
    /// Start playing a pattern, replacing whatever is playing
    fn vibrate(&mut self, pattern: VibePattern);

    /// Stop immediately and leave the motor off
    fn cancel(&mut self);
}
