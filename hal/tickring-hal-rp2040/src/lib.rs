//! RP2040-specific HAL for the watch firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `tickring-hal` traits:
//!
//! - GPIO wrappers for the buttons and the vibration motor
//! - Flash storage driver (implements `tickring_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;

// Re-export shared traits from tickring-hal for convenience
pub use tickring_hal::{FlashStorage as FlashStorageTrait, StorageKey};
