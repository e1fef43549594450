//! Button click recognizer
//!
//! Fed the raw pin level every poll period, [`ButtonDecoder`] debounces it
//! and reports what the press means:
//!
//! - `Pressed` as soon as a debounced press is seen
//! - `Click` on release, unless the hold already produced a repeat or long press
//! - `Repeat` while a repeating button is held, first after `repeat_delay_ms`,
//!   then every `repeat_ms`
//! - `LongPress` once, when a long-press button is held for `long_press_ms`

use tickring_core::config::ButtonConfig;

/// What holding the button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldBehavior {
    /// Holding does nothing; release clicks
    Click,
    /// Holding repeats the click
    Repeating,
    /// Holding long enough fires a long press instead of a click
    LongPress,
}

/// Recognized button action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    Pressed,
    Click,
    Repeat,
    LongPress,
}

/// Debouncer and click recognizer for one button
#[derive(Debug, Clone)]
pub struct ButtonDecoder {
    behavior: HoldBehavior,
    config: ButtonConfig,
    /// Last raw level seen
    raw: bool,
    /// How long the raw level has been stable
    stable_ms: u32,
    /// Debounced level
    pressed: bool,
    /// Time since the debounced press
    held_ms: u32,
    /// Hold time at which the next repeat fires
    next_repeat_ms: u32,
    /// The hold produced a repeat or long press, so release does not click
    consumed: bool,
}

impl ButtonDecoder {
    pub fn new(behavior: HoldBehavior, config: ButtonConfig) -> Self {
        Self {
            behavior,
            config,
            raw: false,
            stable_ms: 0,
            pressed: false,
            held_ms: 0,
            next_repeat_ms: config.repeat_delay_ms,
            consumed: false,
        }
    }

    /// Check if the debounced state is pressed
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one sample; `raw_pressed` is the active level after inversion
    pub fn update(&mut self, raw_pressed: bool, delta_ms: u32) -> Option<ButtonAction> {
        if raw_pressed != self.raw {
            self.raw = raw_pressed;
            self.stable_ms = 0;
        } else {
            self.stable_ms = self.stable_ms.saturating_add(delta_ms);
        }

        let settled = self.stable_ms >= self.config.debounce_ms;
        if settled && self.raw != self.pressed {
            self.pressed = self.raw;
            return if self.pressed {
                self.held_ms = 0;
                self.next_repeat_ms = self.config.repeat_delay_ms;
                self.consumed = false;
                Some(ButtonAction::Pressed)
            } else if self.consumed {
                None
            } else {
                Some(ButtonAction::Click)
            };
        }

        if !self.pressed {
            return None;
        }

        self.held_ms = self.held_ms.saturating_add(delta_ms);
        match self.behavior {
            HoldBehavior::Click => None,
            HoldBehavior::Repeating => {
                if self.held_ms >= self.next_repeat_ms {
                    self.next_repeat_ms = self.next_repeat_ms.saturating_add(self.config.repeat_ms.max(1));
                    self.consumed = true;
                    Some(ButtonAction::Repeat)
                } else {
                    None
                }
            }
            HoldBehavior::LongPress => {
                if !self.consumed && self.held_ms >= self.config.long_press_ms {
                    self.consumed = true;
                    Some(ButtonAction::LongPress)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLL: u32 = 10;

    fn config() -> ButtonConfig {
        ButtonConfig {
            poll_ms: POLL,
            debounce_ms: 20,
            repeat_delay_ms: 400,
            repeat_ms: 100,
            long_press_ms: 750,
        }
    }

    type Actions = heapless::Vec<ButtonAction, 32>;

    /// Hold `level` for `ms`, collecting every action
    fn run(decoder: &mut ButtonDecoder, level: bool, ms: u32) -> Actions {
        let mut actions = Actions::new();
        for _ in 0..(ms / POLL) {
            if let Some(action) = decoder.update(level, POLL) {
                actions.push(action).unwrap();
            }
        }
        actions
    }

    fn count(actions: &Actions, action: ButtonAction) -> usize {
        actions.iter().filter(|a| **a == action).count()
    }

    #[test]
    fn test_short_press_clicks() {
        let mut b = ButtonDecoder::new(HoldBehavior::Click, config());

        let down = run(&mut b, true, 100);
        assert_eq!(down.first(), Some(&ButtonAction::Pressed));
        assert!(b.is_pressed());

        let up = run(&mut b, false, 100);
        assert_eq!(up.first(), Some(&ButtonAction::Click));
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_bounce_is_filtered() {
        let mut b = ButtonDecoder::new(HoldBehavior::Click, config());
        for level in [true, false, true, false, true, false] {
            assert_eq!(b.update(level, POLL), None);
        }
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_repeat_while_held() {
        let mut b = ButtonDecoder::new(HoldBehavior::Repeating, config());

        // Pressed after 30 ms of debounce, then repeats at 400, 500, 600 and 700 ms held
        let held = run(&mut b, true, 30 + 700);
        assert_eq!(count(&held, ButtonAction::Pressed), 1);
        assert_eq!(count(&held, ButtonAction::Repeat), 4);

        let up = run(&mut b, false, 100);
        assert!(up.is_empty(), "repeated hold must not click on release");
    }

    #[test]
    fn test_long_press_replaces_click() {
        let mut b = ButtonDecoder::new(HoldBehavior::LongPress, config());

        let held = run(&mut b, true, 1500);
        assert_eq!(count(&held, ButtonAction::LongPress), 1);

        let up = run(&mut b, false, 100);
        assert!(up.is_empty());

        // A short press afterwards clicks normally
        run(&mut b, true, 100);
        let up = run(&mut b, false, 100);
        assert_eq!(up.first(), Some(&ButtonAction::Click));
    }
}
