//! Animation registry
//!
//! Owns every in-flight animation, keyed by target. At most one record
//! exists per target: inserting for a target that is already animating
//! drops the old record first. Records own their `from`/`to` snapshots by
//! value, so dropping a record is the only cleanup ever needed.

use heapless::FnvIndexMap;

use super::curve::{interpolate, interpolate_rect, Curve};
use crate::geometry::Rect;

/// Identity of an animated scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScalarHandle(pub u8);

/// Identity of an animated rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RectHandle(pub u8);

/// Animation target, used as the de-duplication key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    Scalar(ScalarHandle),
    Rect(RectHandle),
}

impl From<ScalarHandle> for Target {
    fn from(handle: ScalarHandle) -> Self {
        Target::Scalar(handle)
    }
}

impl From<RectHandle> for Target {
    fn from(handle: RectHandle) -> Self {
        Target::Rect(handle)
    }
}

/// A snapshot of an animated value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Scalar(i32),
    Rect(Rect),
}

impl Value {
    /// Interpolate towards `to`
    ///
    /// Mismatched variants cannot be blended and resolve to `to`.
    pub fn interpolate(self, to: Value, elapsed: u32, duration: u32, curve: Curve) -> Value {
        match (self, to) {
            (Value::Scalar(a), Value::Scalar(b)) => {
                Value::Scalar(interpolate(a, b, elapsed, duration, curve))
            }
            (Value::Rect(a), Value::Rect(b)) => {
                Value::Rect(interpolate_rect(a, b, elapsed, duration, curve))
            }
            _ => to,
        }
    }
}

/// Live storage the scheduler reads from and writes into
///
/// Implemented by whatever owns the animated fields (the drawing layer).
pub trait Animatable {
    /// Current value of a target, or `None` if the target is unknown
    fn value(&self, target: Target) -> Option<Value>;

    /// Overwrite the value of a target
    fn set_value(&mut self, target: Target, value: Value);
}

/// Result of stepping a single animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Start delay has not expired yet; target untouched
    Waiting,
    /// Target written, animation continues
    Advanced,
    /// Target holds the final value; animation is done
    Finished,
    /// Target no longer exists; animation should be discarded
    Orphaned,
}

/// A single in-flight animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation {
    pub target: Target,
    /// Sampled on the first step after the delay expires
    pub from: Option<Value>,
    pub to: Value,
    pub start_ms: u64,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub curve: Curve,
}

impl Animation {
    pub const fn new(
        target: Target,
        to: Value,
        start_ms: u64,
        duration_ms: u32,
        delay_ms: u32,
        curve: Curve,
    ) -> Self {
        Self {
            target,
            from: None,
            to,
            start_ms,
            duration_ms,
            delay_ms,
            curve,
        }
    }

    /// Time at which stepping begins
    pub const fn begins_at_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.delay_ms as u64)
    }

    /// Check whether `from` has been captured yet
    pub const fn is_sampled(&self) -> bool {
        self.from.is_some()
    }

    /// Advance the animation to `now_ms`, writing into `values`
    pub fn step<V: Animatable + ?Sized>(&mut self, now_ms: u64, values: &mut V) -> StepOutcome {
        let begins = self.begins_at_ms();
        if now_ms < begins {
            return StepOutcome::Waiting;
        }

        let from = match self.from {
            Some(from) => from,
            None => match values.value(self.target) {
                Some(current) => {
                    self.from = Some(current);
                    current
                }
                None => return StepOutcome::Orphaned,
            },
        };

        let elapsed = (now_ms - begins).min(u32::MAX as u64) as u32;
        let value = from.interpolate(self.to, elapsed, self.duration_ms, self.curve);
        values.set_value(self.target, value);

        if elapsed >= self.duration_ms {
            StepOutcome::Finished
        } else {
            StepOutcome::Advanced
        }
    }
}

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationError {
    /// No room for another animation record
    RegistryFull,
}

/// Fixed-capacity set of active animations
///
/// `N` must be a power of two.
pub struct AnimationRegistry<const N: usize> {
    active: FnvIndexMap<Target, Animation, N>,
}

impl<const N: usize> Default for AnimationRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> AnimationRegistry<N> {
    pub fn new() -> Self {
        Self {
            active: FnvIndexMap::new(),
        }
    }

    /// Add an animation, superseding any animation on the same target
    ///
    /// Returns the superseded record, if there was one.
    pub fn insert(&mut self, animation: Animation) -> Result<Option<Animation>, AnimationError> {
        let superseded = self.active.remove(&animation.target);
        self.active
            .insert(animation.target, animation)
            .map_err(|_| AnimationError::RegistryFull)?;
        Ok(superseded)
    }

    /// Remove the animation for a target, if any
    pub fn remove(&mut self, target: Target) -> Option<Animation> {
        self.active.remove(&target)
    }

    /// Drop every animation
    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn get(&self, target: Target) -> Option<&Animation> {
        self.active.get(&target)
    }

    pub fn contains(&self, target: Target) -> bool {
        self.active.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animation> {
        self.active.values()
    }

    /// Step every animation and drop the finished and orphaned ones
    ///
    /// `on_step` sees every outcome, in registry order.
    pub fn step_all<V, F>(&mut self, now_ms: u64, values: &mut V, mut on_step: F)
    where
        V: Animatable + ?Sized,
        F: FnMut(&Animation, StepOutcome),
    {
        self.active.retain(|_, animation| {
            let outcome = animation.step(now_ms, values);
            on_step(animation, outcome);
            matches!(outcome, StepOutcome::Waiting | StepOutcome::Advanced)
        });
    }
}
