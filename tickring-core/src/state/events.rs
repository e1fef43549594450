//! Events that trigger control-mode transitions

/// Events that can change the control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Select clicked: advance to the next field, or start/pause the timer
    Select,
    /// Back clicked; `has_hours` is whether the timer shows an hours field
    Back { has_hours: bool },
    /// Select held: timer zeroed
    Reset,
    /// A button silenced the expiry alarm: timer rewound
    Rewind,
}

impl Event {
    /// Check if this event was caused by the timer being changed underneath
    pub fn is_timer_reset(&self) -> bool {
        matches!(self, Event::Reset | Event::Rewind)
    }
}
