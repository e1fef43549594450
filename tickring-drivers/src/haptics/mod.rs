//! Haptic feedback drivers

pub mod vibe;

pub use vibe::VibeMotor;
