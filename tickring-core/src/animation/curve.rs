//! Interpolation engine
//!
//! Pure functions mapping `(from, to, elapsed, duration, curve)` to the
//! current value. Everything is integer math: progress is scaled to
//! `0..=PROGRESS_SCALE` and intermediates are widened to `i64`.
//!
//! The value at `elapsed >= duration` is always exactly `to`, and every
//! curve keeps its eased progress inside `[0, PROGRESS_SCALE]`, so results
//! never leave the `[from, to]` range.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::trig::{cos_lookup, sin_lookup, TRIG_MAX_ANGLE, TRIG_MAX_RATIO};
use crate::geometry::{Point, Rect, Size};

/// Fixed-point representation of full progress (1.0)
pub const PROGRESS_SCALE: i64 = 0x10000;

const S: i64 = PROGRESS_SCALE;

/// Easing curve applied to the animation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Curve {
    #[default]
    Linear,
    QuadraticEaseIn,
    QuadraticEaseOut,
    QuadraticEaseInOut,
    SinusoidalEaseIn,
    SinusoidalEaseOut,
    SinusoidalEaseInOut,
}

impl Curve {
    /// All curves, in declaration order
    pub const ALL: [Curve; 7] = [
        Curve::Linear,
        Curve::QuadraticEaseIn,
        Curve::QuadraticEaseOut,
        Curve::QuadraticEaseInOut,
        Curve::SinusoidalEaseIn,
        Curve::SinusoidalEaseOut,
        Curve::SinusoidalEaseInOut,
    ];

    /// Map linear progress to eased progress
    ///
    /// Both are in `0..=PROGRESS_SCALE`; input outside that range is clamped.
    pub fn ease(self, progress: i64) -> i64 {
        let t = progress.clamp(0, S);
        let eased = match self {
            Curve::Linear => t,
            Curve::QuadraticEaseIn => t * t / S,
            Curve::QuadraticEaseOut => t * (2 * S - t) / S,
            Curve::QuadraticEaseInOut => {
                if t < S / 2 {
                    2 * t * t / S
                } else {
                    let rest = S - t;
                    S - 2 * rest * rest / S
                }
            }
            Curve::SinusoidalEaseIn => S - ratio_to_progress(cos_lookup(scale_angle(t, 4))),
            Curve::SinusoidalEaseOut => ratio_to_progress(sin_lookup(scale_angle(t, 4))),
            Curve::SinusoidalEaseInOut => {
                (S - ratio_to_progress(cos_lookup(scale_angle(t, 2)))) / 2
            }
        };
        eased.clamp(0, S)
    }
}

/// Angle covering `1/divisor` of a turn at full progress
fn scale_angle(t: i64, divisor: i64) -> i32 {
    (t * (TRIG_MAX_ANGLE as i64 / divisor) / S) as i32
}

fn ratio_to_progress(ratio: i32) -> i64 {
    ratio as i64 * S / TRIG_MAX_RATIO as i64
}

/// Linear progress of `elapsed` through `duration`
///
/// `duration` must be non-zero.
fn progress(elapsed: u32, duration: u32) -> i64 {
    (elapsed as i64 * S) / duration as i64
}

/// Interpolate a scalar between `from` and `to`
///
/// Returns `to` exactly once `elapsed >= duration`, which also covers
/// zero-length animations.
pub fn interpolate(from: i32, to: i32, elapsed: u32, duration: u32, curve: Curve) -> i32 {
    if elapsed >= duration {
        return to;
    }
    let eased = curve.ease(progress(elapsed, duration));
    let delta = to as i64 - from as i64;
    (from as i64 + delta * eased / S) as i32
}

fn interpolate_i16(from: i16, to: i16, elapsed: u32, duration: u32, curve: Curve) -> i16 {
    interpolate(from as i32, to as i32, elapsed, duration, curve) as i16
}

/// Interpolate both coordinates of a point independently
pub fn interpolate_point(from: Point, to: Point, elapsed: u32, duration: u32, curve: Curve) -> Point {
    Point::new(
        interpolate_i16(from.x, to.x, elapsed, duration, curve),
        interpolate_i16(from.y, to.y, elapsed, duration, curve),
    )
}

/// Interpolate the four fields of a rectangle independently
pub fn interpolate_rect(from: Rect, to: Rect, elapsed: u32, duration: u32, curve: Curve) -> Rect {
    Rect {
        origin: interpolate_point(from.origin, to.origin, elapsed, duration, curve),
        size: Size::new(
            interpolate_i16(from.size.w, to.size.w, elapsed, duration, curve),
            interpolate_i16(from.size.h, to.size.h, elapsed, duration, curve),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_linear_midpoint() {
        assert_eq!(interpolate(0, 100, 500, 1000, Curve::Linear), 50);
        assert_eq!(interpolate(100, 0, 500, 1000, Curve::Linear), 50);
        assert_eq!(interpolate(-40, 40, 250, 1000, Curve::Linear), -20);
    }

    #[test]
    fn test_zero_duration_returns_target() {
        for curve in Curve::ALL {
            assert_eq!(interpolate(3, 9, 0, 0, curve), 9);
        }
    }

    #[test]
    fn test_past_end_returns_target() {
        for curve in Curve::ALL {
            assert_eq!(interpolate(0, 77, 5000, 1000, curve), 77);
        }
    }

    #[test]
    fn test_quadratic_shapes() {
        // At a quarter of the way through:
        // ease-in lags linear, ease-out leads it
        let lin = interpolate(0, 1000, 250, 1000, Curve::Linear);
        let ease_in = interpolate(0, 1000, 250, 1000, Curve::QuadraticEaseIn);
        let ease_out = interpolate(0, 1000, 250, 1000, Curve::QuadraticEaseOut);
        assert_eq!(lin, 250);
        assert_eq!(ease_in, 62);
        assert_eq!(ease_out, 437);
        assert_eq!(interpolate(0, 1000, 500, 1000, Curve::QuadraticEaseInOut), 500);
    }

    #[test]
    fn test_sinusoidal_shapes() {
        let ease_in = interpolate(0, 1000, 500, 1000, Curve::SinusoidalEaseIn);
        let ease_out = interpolate(0, 1000, 500, 1000, Curve::SinusoidalEaseOut);
        let in_out = interpolate(0, 1000, 500, 1000, Curve::SinusoidalEaseInOut);
        // 1 - cos(45°) ≈ 0.293, sin(45°) ≈ 0.707
        assert!((ease_in - 293).abs() <= 2, "ease_in = {}", ease_in);
        assert!((ease_out - 707).abs() <= 2, "ease_out = {}", ease_out);
        assert!((in_out - 500).abs() <= 1, "in_out = {}", in_out);
    }

    #[test]
    fn test_rect_fields_independent() {
        let from = Rect::new(0, 100, 10, 50);
        let to = Rect::new(100, 0, 30, 50);

        let mid = interpolate_rect(from, to, 500, 1000, Curve::Linear);
        assert_eq!(mid, Rect::new(50, 50, 20, 50));

        let end = interpolate_rect(from, to, 1000, 1000, Curve::Linear);
        assert_eq!(end, to);
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let v = interpolate(i32::MIN, i32::MAX, 500, 1000, Curve::QuadraticEaseInOut);
        assert!((v as i64).abs() < 1 << 20);
    }

    fn any_curve() -> impl Strategy<Value = Curve> {
        (0..Curve::ALL.len()).prop_map(|i| Curve::ALL[i])
    }

    proptest! {
        #[test]
        fn test_endpoints_exact(
            from in -100_000i32..100_000,
            to in -100_000i32..100_000,
            duration in 1u32..60_000,
            curve in any_curve(),
        ) {
            prop_assert_eq!(interpolate(from, to, 0, duration, curve), from);
            prop_assert_eq!(interpolate(from, to, duration, duration, curve), to);
        }

        #[test]
        fn test_monotonic_without_overshoot(
            from in -10_000i32..10_000,
            to in -10_000i32..10_000,
            duration in 1u32..2_000,
            curve in any_curve(),
        ) {
            let (lo, hi) = (from.min(to), from.max(to));
            let mut last = from;
            for elapsed in 0..=duration {
                let v = interpolate(from, to, elapsed, duration, curve);
                prop_assert!(v >= lo && v <= hi, "{:?} left range at {}: {}", curve, elapsed, v);
                if to >= from {
                    prop_assert!(v >= last, "{:?} went backwards at {}", curve, elapsed);
                } else {
                    prop_assert!(v <= last, "{:?} went backwards at {}", curve, elapsed);
                }
                last = v;
            }
        }
    }
}
