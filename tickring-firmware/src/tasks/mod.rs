//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod alarm;
pub mod buttons;
pub mod controller;
pub mod display;
pub mod storage;
pub mod vibe;

pub use alarm::alarm_task;
pub use buttons::{buttons_task, ButtonPins};
pub use controller::controller_task;
pub use display::display_task;
pub use storage::storage_task;
pub use vibe::vibe_task;
