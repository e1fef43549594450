//! GPIO wrappers
//!
//! Thin adapters from embassy-rp pins to the `tickring-hal` traits.

use embassy_rp::gpio::{Input, Output};
use tickring_hal::gpio::{InputPin, OutputPin};

/// Push-pull output (vibration motor driver)
pub struct Rp2040Output<'d>(Output<'d>);

impl<'d> Rp2040Output<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for Rp2040Output<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input (buttons)
pub struct Rp2040Input<'d>(Input<'d>);

impl<'d> Rp2040Input<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for Rp2040Input<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
