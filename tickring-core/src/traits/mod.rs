//! Collaborator traits
//!
//! These traits define the services the core consumes from the platform.
//! Firmware implements them over embassy timers and signals; tests use
//! simple in-memory versions.

pub mod clock;
pub mod haptics;

pub use clock::{Alarm, Clock};
pub use haptics::{Haptics, VibePattern};
