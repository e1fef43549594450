//! Hardware driver implementations for Tickring
//!
//! Drivers here are pure state machines advanced by elapsed time. Firmware
//! tasks own the pins, feed the drivers and apply their outputs, which keeps
//! the timing logic testable on the host.
//!
//! - [`haptics::VibeMotor`]: plays vibration patterns on an on/off motor
//! - [`input::ButtonDecoder`]: turns sampled pin levels into click actions

#![no_std]
#![deny(unsafe_code)]

pub mod haptics;
pub mod input;
