//! Animation scheduler
//!
//! [`Animator`] is the context object the application root owns and passes
//! to every caller that starts or stops animations. It drives the registry
//! with a self-rescheduling one-shot alarm:
//!
//! ```text
//!            start_* (alarm armed)
//!   ┌──────┐ ───────────────────────▶ ┌─────────┐ ──┐ tick, registry non-empty
//!   │ Idle │                          │ Running │   │ (alarm re-armed)
//!   └──────┘ ◀─────────────────────── └─────────┘ ◀─┘
//!            tick leaves registry empty,
//!            or stop_all
//! ```
//!
//! The platform calls [`Animator::tick`] when the alarm fires. A tick that
//! runs late simply steps everything further along; nothing queues up.

use super::curve::Curve;
use super::registry::{
    Animatable, Animation, AnimationError, AnimationRegistry, RectHandle, ScalarHandle,
    StepOutcome, Target, Value,
};
use crate::geometry::Rect;
use crate::traits::{Alarm, Clock};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 30;

/// Default registry capacity (must be a power of two)
pub const MAX_ANIMATIONS: usize = 8;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// No alarm armed
    Idle,
    /// One-shot alarm armed for the next tick
    Running,
}

/// Summary of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Animations that wrote their target this tick
    pub stepped: usize,
    /// Animations removed this tick (finished or orphaned)
    pub completed: usize,
    /// Animations still active after the tick
    pub remaining: usize,
}

/// Animation engine: registry plus tick scheduler
pub struct Animator<C: Clock, A: Alarm, const N: usize = MAX_ANIMATIONS> {
    clock: C,
    alarm: A,
    registry: AnimationRegistry<N>,
    state: SchedulerState,
    tick_interval_ms: u32,
    on_update: Option<fn()>,
}

impl<C: Clock, A: Alarm, const N: usize> Animator<C, A, N> {
    /// Create an idle animator with the default tick interval
    pub fn new(clock: C, alarm: A) -> Self {
        Self::with_tick_interval(clock, alarm, DEFAULT_TICK_INTERVAL_MS)
    }

    /// Create an idle animator ticking every `tick_interval_ms` (at least 1)
    pub fn with_tick_interval(clock: C, alarm: A, tick_interval_ms: u32) -> Self {
        Self {
            clock,
            alarm,
            registry: AnimationRegistry::new(),
            state: SchedulerState::Idle,
            tick_interval_ms: tick_interval_ms.max(1),
            on_update: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn registry(&self) -> &AnimationRegistry<N> {
        &self.registry
    }

    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_animating(&self, target: impl Into<Target>) -> bool {
        self.registry.contains(target.into())
    }

    /// Animate a scalar target towards `to`
    ///
    /// Any animation already running on `target` is dropped first.
    /// `from` is sampled on the first tick after `delay_ms` has passed.
    pub fn start_scalar(
        &mut self,
        target: ScalarHandle,
        to: i32,
        duration_ms: u32,
        delay_ms: u32,
        curve: Curve,
    ) -> Result<(), AnimationError> {
        self.start(target.into(), Value::Scalar(to), duration_ms, delay_ms, curve)
    }

    /// Animate a rectangle target towards `to`, field by field
    pub fn start_rect(
        &mut self,
        target: RectHandle,
        to: Rect,
        duration_ms: u32,
        delay_ms: u32,
        curve: Curve,
    ) -> Result<(), AnimationError> {
        self.start(target.into(), Value::Rect(to), duration_ms, delay_ms, curve)
    }

    fn start(
        &mut self,
        target: Target,
        to: Value,
        duration_ms: u32,
        delay_ms: u32,
        curve: Curve,
    ) -> Result<(), AnimationError> {
        let now = self.clock.now_ms();
        let animation = Animation::new(target, to, now, duration_ms, delay_ms, curve);
        self.registry.insert(animation)?;

        if self.state == SchedulerState::Idle {
            self.alarm.schedule(self.tick_interval_ms);
            self.state = SchedulerState::Running;
        }
        Ok(())
    }

    /// Stop the animation on `target`, leaving its value where it is
    ///
    /// Returns `false` if nothing was animating that target.
    pub fn stop(&mut self, target: impl Into<Target>) -> bool {
        self.registry.remove(target.into()).is_some()
    }

    /// Cancel the pending tick and drop every animation
    pub fn stop_all(&mut self) {
        if self.state == SchedulerState::Running {
            self.alarm.cancel();
        }
        self.registry.clear();
        self.state = SchedulerState::Idle;
    }

    /// Set the callback run after every tick that stepped something
    ///
    /// Replaces any previously registered callback.
    pub fn register_update_callback(&mut self, callback: fn()) {
        self.on_update = Some(callback);
    }

    /// Step all active animations
    ///
    /// Call this when the alarm fires. Re-arms the alarm only while
    /// animations remain.
    pub fn tick<V: Animatable + ?Sized>(&mut self, values: &mut V) -> TickReport {
        let now = self.clock.now_ms();
        let mut report = TickReport::default();

        self.registry.step_all(now, values, |_, outcome| match outcome {
            StepOutcome::Waiting => {}
            StepOutcome::Advanced => report.stepped += 1,
            StepOutcome::Finished => {
                report.stepped += 1;
                report.completed += 1;
            }
            StepOutcome::Orphaned => report.completed += 1,
        });
        report.remaining = self.registry.len();

        if self.registry.is_empty() {
            self.state = SchedulerState::Idle;
        } else {
            self.alarm.schedule(self.tick_interval_ms);
            self.state = SchedulerState::Running;
        }

        if report.stepped > 0 {
            if let Some(callback) = self.on_update {
                callback();
            }
        }

        report
    }
}
