//! Display abstraction and watch face rendering for Tickring
//!
//! This crate provides:
//! - `DisplayBackend` trait for monochrome pixel displays
//! - `FrameBuffer`, a 128x64 page-organized buffer implementing it
//! - `Drawing`, the watch face: progress ring, center plate and time digits
//!
//! # Architecture
//!
//! `Drawing` owns every animated value on the face and implements
//! `Animatable`, so the animation engine in `tickring-core` writes into it
//! directly. Rendering only reads those values; it never starts animations.
//!
//! The firmware renders into a `FrameBuffer` and ships its pages to the
//! panel controller, so nothing in here touches hardware.

#![no_std]

pub mod backend;
pub mod digits;
pub mod drawing;
pub mod frame;

// Re-export key types
pub use backend::{Color, DisplayBackend, DisplayError};
pub use drawing::{Drawing, FaceView, PROGRESS_ANGLE, RING_INSET, TEXT_FRAME};
pub use frame::{FrameBuffer, FRAME_HEIGHT, FRAME_PAGES, FRAME_WIDTH};
