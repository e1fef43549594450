//! Board-agnostic core logic for the Tickring watch timer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Geometry primitives shared by the drawing layer and the animation engine
//! - Animation engine (interpolation curves, registry, tick scheduler)
//! - Collaborator traits (clock, one-shot alarm, haptics)
//! - Countdown/stopwatch timer model and its persisted record
//! - Control-mode state machine for the button UI
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod geometry;
pub mod state;
pub mod timer;
pub mod traits;
