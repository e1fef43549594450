//! GPIO pin abstractions
//!
//! Buttons are read through [`InputPin`] and the vibration motor is
//! switched through [`OutputPin`].

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input with a configured active level
///
/// Watch buttons usually pull the line low when pressed.
pub struct ActiveLevel<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> ActiveLevel<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Check if the input is in its active state
    pub fn is_active(&self) -> bool {
        self.pin.is_high() != self.active_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePin(bool);

    impl InputPin for FakePin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    struct FakeOutput(bool);

    impl OutputPin for FakeOutput {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_active_low_inverts() {
        assert!(ActiveLevel::new(FakePin(false), true).is_active());
        assert!(!ActiveLevel::new(FakePin(true), true).is_active());
        assert!(ActiveLevel::new(FakePin(true), false).is_active());
    }

    #[test]
    fn test_set_state() {
        let mut out = FakeOutput(false);
        out.set_state(true);
        assert!(out.is_set_high());
        out.set_state(false);
        assert!(!out.is_set_high());
    }
}
