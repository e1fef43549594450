//! Property animation engine
//!
//! - [`curve`]: pure interpolation functions and easing curves
//! - [`registry`]: the set of in-flight animations, one per target
//! - [`scheduler`]: the tick loop that advances them on a one-shot alarm
//! - [`trig`]: fixed-point sine/cosine used by the sinusoidal curves

pub mod curve;
pub mod registry;
pub mod scheduler;
pub mod trig;

pub use curve::{interpolate, interpolate_point, interpolate_rect, Curve};
pub use registry::{
    Animatable, Animation, AnimationError, AnimationRegistry, RectHandle, ScalarHandle,
    StepOutcome, Target, Value,
};
pub use scheduler::{Animator, SchedulerState, TickReport, DEFAULT_TICK_INTERVAL_MS, MAX_ANIMATIONS};
