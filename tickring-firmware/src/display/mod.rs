//! Panel driver
//!
//! The face is rendered into a `tickring_display::FrameBuffer` by the
//! controller; this module only knows how to ship those pages to the OLED.

pub mod sh1106;

pub use sh1106::Sh1106;
