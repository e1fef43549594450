//! Control-mode state machine
//!
//! The face is always in one of four modes. In the three edit modes Up and
//! Down change one field of the timer; in `Counting` they are ignored.

use super::events::Event;
use crate::timer::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Which part of the timer the buttons act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    EditHours,
    EditMinutes,
    EditSeconds,
    Counting,
}

impl ControlMode {
    /// Mode to open the face in
    ///
    /// A running timer is shown counting. A paused one opens on its largest
    /// non-empty field.
    pub fn initial(paused: bool, hours: u16) -> Self {
        if !paused {
            ControlMode::Counting
        } else if hours > 0 {
            ControlMode::EditHours
        } else {
            ControlMode::EditMinutes
        }
    }

    /// Check if Up/Down edit the timer in this mode
    pub fn is_editing(&self) -> bool {
        !matches!(self, ControlMode::Counting)
    }

    /// Amount one Up press adds to the timer
    pub fn step_ms(&self) -> Option<i64> {
        match self {
            ControlMode::EditHours => Some(MS_PER_HOUR),
            ControlMode::EditMinutes => Some(MS_PER_MINUTE),
            ControlMode::EditSeconds => Some(MS_PER_SECOND),
            ControlMode::Counting => None,
        }
    }

    /// Check if Back in this mode leaves the app instead of changing mode
    pub fn exits_on_back(&self, has_hours: bool) -> bool {
        match self {
            ControlMode::EditSeconds => false,
            ControlMode::EditMinutes => !has_hours,
            ControlMode::EditHours | ControlMode::Counting => true,
        }
    }

    /// Check if Select in this mode starts or pauses the timer
    pub fn select_toggles_timer(&self) -> bool {
        matches!(self, ControlMode::EditSeconds | ControlMode::Counting)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use ControlMode::*;
        use Event::*;

        match (self, event) {
            // Timer changed underneath
            (_, Reset) => EditMinutes,
            (_, Rewind) => EditSeconds,

            // Select walks through the fields, then starts/pauses
            (EditHours, Select) => EditMinutes,
            (EditMinutes, Select) => EditSeconds,
            (EditSeconds, Select) => Counting,
            (Counting, Select) => EditSeconds,

            // Back walks back up the fields
            (EditSeconds, Back { .. }) => EditMinutes,
            (EditMinutes, Back { has_hours: true }) => EditHours,

            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode() {
        assert_eq!(ControlMode::initial(false, 0), ControlMode::Counting);
        assert_eq!(ControlMode::initial(true, 2), ControlMode::EditHours);
        assert_eq!(ControlMode::initial(true, 0), ControlMode::EditMinutes);
    }

    #[test]
    fn test_select_cycle() {
        let mut mode = ControlMode::EditHours;
        mode = mode.transition(Event::Select);
        assert_eq!(mode, ControlMode::EditMinutes);
        mode = mode.transition(Event::Select);
        assert_eq!(mode, ControlMode::EditSeconds);
        assert!(mode.select_toggles_timer());
        mode = mode.transition(Event::Select);
        assert_eq!(mode, ControlMode::Counting);
        mode = mode.transition(Event::Select);
        assert_eq!(mode, ControlMode::EditSeconds);
    }

    #[test]
    fn test_back_navigation() {
        let back = |has_hours| Event::Back { has_hours };

        assert_eq!(ControlMode::EditSeconds.transition(back(false)), ControlMode::EditMinutes);
        assert_eq!(ControlMode::EditMinutes.transition(back(true)), ControlMode::EditHours);
        assert_eq!(ControlMode::EditMinutes.transition(back(false)), ControlMode::EditMinutes);

        assert!(ControlMode::EditMinutes.exits_on_back(false));
        assert!(!ControlMode::EditMinutes.exits_on_back(true));
        assert!(!ControlMode::EditSeconds.exits_on_back(false));
        assert!(ControlMode::Counting.exits_on_back(true));
        assert!(ControlMode::EditHours.exits_on_back(true));
    }

    #[test]
    fn test_reset_and_rewind_from_any_mode() {
        for mode in [
            ControlMode::EditHours,
            ControlMode::EditMinutes,
            ControlMode::EditSeconds,
            ControlMode::Counting,
        ] {
            assert_eq!(mode.transition(Event::Reset), ControlMode::EditMinutes);
            assert_eq!(mode.transition(Event::Rewind), ControlMode::EditSeconds);
        }
    }

    #[test]
    fn test_counting_ignores_edits() {
        assert_eq!(ControlMode::Counting.step_ms(), None);
        assert!(!ControlMode::Counting.is_editing());
        assert_eq!(ControlMode::EditMinutes.step_ms(), Some(MS_PER_MINUTE));
    }
}
