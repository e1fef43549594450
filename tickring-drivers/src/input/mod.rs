//! Input drivers

pub mod buttons;

pub use buttons::{ButtonAction, ButtonDecoder, HoldBehavior};
