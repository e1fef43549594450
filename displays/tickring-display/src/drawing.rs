//! Watch face
//!
//! The face is a ring around the panel edge with a center plate holding the
//! time. The ring is covered by a pie wedge that grows with progress: the
//! share of the countdown already spent, or the position within the current
//! minute once the timer counts up.
//!
//! [`Drawing`] owns the three animated values:
//!
//! | Handle           | Value                                 |
//! |------------------|---------------------------------------|
//! | `PROGRESS_ANGLE` | wedge angle, `0..=TRIG_MAX_ANGLE`     |
//! | `RING_INSET`     | how far the ring is pulled in, pixels |
//! | `TEXT_FRAME`     | rectangle the digits are drawn in     |

use tickring_core::animation::trig::{cos_lookup, sin_lookup, TRIG_MAX_ANGLE, TRIG_MAX_RATIO};
use tickring_core::animation::{
    Animatable, AnimationError, Animator, Curve, RectHandle, ScalarHandle, Target, Value,
};
use tickring_core::config::AnimationConfig;
use tickring_core::geometry::{Point, Rect};
use tickring_core::state::ControlMode;
use tickring_core::timer::{TimeParts, Timer, MS_PER_MINUTE};
use tickring_core::traits::{Alarm, Clock};

use crate::backend::{Color, DisplayBackend, DisplayError};
use crate::digits::{draw_time, Field};

pub const PROGRESS_ANGLE: ScalarHandle = ScalarHandle(0);
pub const RING_INSET: ScalarHandle = ScalarHandle(1);
pub const TEXT_FRAME: RectHandle = RectHandle(0);

/// Ring thickness in pixels
pub const RING_WIDTH: i16 = 6;

/// Gap between the plate edge and the digits
const TEXT_MARGIN_X: i16 = 4;
const TEXT_MARGIN_Y: i16 = 8;

/// Everything the face shows about the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceView {
    pub value_ms: u64,
    pub length_ms: i64,
    pub chrono: bool,
    pub mode: ControlMode,
    pub parts: TimeParts,
}

impl FaceView {
    /// Snapshot the timer at `now_ms`
    pub fn from_timer(timer: &Timer, mode: ControlMode, now_ms: u64) -> Self {
        Self {
            value_ms: timer.value_ms(now_ms),
            length_ms: timer.length_ms(),
            chrono: timer.is_chrono(now_ms),
            mode,
            parts: timer.time_parts(now_ms),
        }
    }

    /// Wedge angle this view should settle at
    pub fn progress_angle(&self) -> i32 {
        let max = TRIG_MAX_ANGLE as i64;
        if self.chrono {
            let within = (self.value_ms % MS_PER_MINUTE as u64) as i64;
            (max * within / MS_PER_MINUTE) as i32
        } else if self.length_ms <= 0 {
            0
        } else {
            let spent = (self.length_ms - self.value_ms as i64).clamp(0, self.length_ms);
            (max * spent / self.length_ms) as i32
        }
    }
}

/// Watch face state and renderer
#[derive(Debug, Clone)]
pub struct Drawing {
    bounds: Rect,
    /// Where the digits rest when not bouncing
    home_frame: Rect,
    text_frame: Rect,
    progress_angle: i32,
    ring_inset: i32,
    config: AnimationConfig,
}

impl Drawing {
    /// Lay the face out for a display of `bounds`
    pub fn new(bounds: Rect, config: AnimationConfig) -> Self {
        let plate = bounds.inset(RING_WIDTH);
        let home_frame = Rect::new(
            plate.origin.x + TEXT_MARGIN_X,
            plate.origin.y + TEXT_MARGIN_Y,
            (plate.size.w - 2 * TEXT_MARGIN_X).max(0),
            (plate.size.h - 2 * TEXT_MARGIN_Y).max(0),
        );
        Self {
            bounds,
            home_frame,
            text_frame: home_frame,
            progress_angle: 0,
            ring_inset: 0,
            config,
        }
    }

    pub fn progress_angle(&self) -> i32 {
        self.progress_angle
    }

    pub fn ring_inset(&self) -> i32 {
        self.ring_inset
    }

    pub fn text_frame(&self) -> Rect {
        self.text_frame
    }

    pub fn home_frame(&self) -> Rect {
        self.home_frame
    }

    /// Bring the progress ring in line with the timer
    ///
    /// Large jumps (an edit, a reset, a minute rollover) are animated; the
    /// steady per-second creep is set directly.
    pub fn update<C: Clock, A: Alarm, const N: usize>(
        &mut self,
        animator: &mut Animator<C, A, N>,
        view: &FaceView,
    ) -> Result<(), AnimationError> {
        let target = view.progress_angle();

        if let Some(running) = animator.registry().get(PROGRESS_ANGLE.into()) {
            if running.to == Value::Scalar(target) {
                return Ok(());
            }
        }

        let jump = (target - self.progress_angle).unsigned_abs();
        if jump > self.config.progress_jump_threshold as u32 {
            animator.start_scalar(
                PROGRESS_ANGLE,
                target,
                self.config.progress_ms,
                0,
                Curve::QuadraticEaseInOut,
            )
        } else {
            animator.stop(PROGRESS_ANGLE);
            self.progress_angle = target;
            Ok(())
        }
    }

    /// Kick the digits up or down and let them spring back
    pub fn start_bounce<C: Clock, A: Alarm, const N: usize>(
        &mut self,
        animator: &mut Animator<C, A, N>,
        upward: bool,
    ) -> Result<(), AnimationError> {
        let px = self.config.bounce_px as i16;
        let dy = if upward { -px } else { px };
        self.text_frame = self.home_frame.offset(0, dy);
        animator.start_rect(
            TEXT_FRAME,
            self.home_frame,
            self.config.bounce_ms,
            0,
            Curve::QuadraticEaseOut,
        )
    }

    /// Hide the ring under the plate, then grow it back out
    ///
    /// The ring stays hidden for the configured delay; the animation picks
    /// up the collapsed inset when it actually begins.
    pub fn start_reset<C: Clock, A: Alarm, const N: usize>(
        &mut self,
        animator: &mut Animator<C, A, N>,
    ) -> Result<(), AnimationError> {
        self.ring_inset = RING_WIDTH as i32;
        animator.start_scalar(
            RING_INSET,
            0,
            self.config.reset_ms,
            self.config.reset_delay_ms,
            Curve::SinusoidalEaseOut,
        )
    }

    /// Draw the whole face
    pub fn render<B: DisplayBackend + ?Sized>(
        &self,
        backend: &mut B,
        view: &FaceView,
    ) -> Result<(), DisplayError> {
        backend.clear(Color::Black)?;

        let inset = self.ring_inset.clamp(0, RING_WIDTH as i32) as i16;
        backend.fill_rect(self.bounds.inset(inset), Color::White)?;
        self.render_progress_cover(backend)?;
        backend.fill_rect(self.bounds.inset(RING_WIDTH), Color::Black)?;

        draw_time(
            backend,
            self.text_frame,
            view.parts,
            Field::for_mode(view.mode),
            Color::White,
        )
    }

    /// Black pie wedge from 12 o'clock through the progress angle
    fn render_progress_cover<B: DisplayBackend + ?Sized>(
        &self,
        backend: &mut B,
    ) -> Result<(), DisplayError> {
        let angle = self.progress_angle.clamp(0, TRIG_MAX_ANGLE);
        let step = angle / 4;
        if step < 1 {
            return Ok(());
        }

        let center = self.bounds.center();
        // Past the corners so the wedge covers the whole ring
        let radius = self.bounds.size.w as i32;

        // Arc vertices, the hand position, then the center
        let mut points = [Point::default(); 7];
        let mut count = 0;
        let mut t = 0;
        while t < angle && count < 5 {
            points[count] = polar(center, t, radius);
            count += 1;
            t += step;
        }
        points[count] = polar(center, angle, radius);
        points[count + 1] = center;

        backend.fill_polygon(&points[..count + 2], Color::Black)
    }
}

/// Point at `angle` counterclockwise from 12 o'clock, `radius` away
fn polar(center: Point, angle: i32, radius: i32) -> Point {
    let x = -(sin_lookup(angle) as i64) * radius as i64 / TRIG_MAX_RATIO as i64;
    let y = -(cos_lookup(angle) as i64) * radius as i64 / TRIG_MAX_RATIO as i64;
    center.offset(x as i16, y as i16)
}

impl Animatable for Drawing {
    fn value(&self, target: Target) -> Option<Value> {
        match target {
            Target::Scalar(PROGRESS_ANGLE) => Some(Value::Scalar(self.progress_angle)),
            Target::Scalar(RING_INSET) => Some(Value::Scalar(self.ring_inset)),
            Target::Rect(TEXT_FRAME) => Some(Value::Rect(self.text_frame)),
            _ => None,
        }
    }

    fn set_value(&mut self, target: Target, value: Value) {
        match (target, value) {
            (Target::Scalar(PROGRESS_ANGLE), Value::Scalar(v)) => self.progress_angle = v,
            (Target::Scalar(RING_INSET), Value::Scalar(v)) => self.ring_inset = v,
            (Target::Rect(TEXT_FRAME), Value::Rect(r)) => self.text_frame = r,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameBuffer;
    use core::cell::Cell;

    struct TestClock<'a>(&'a Cell<u64>);

    impl Clock for TestClock<'_> {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    struct TestAlarm;

    impl Alarm for TestAlarm {
        fn schedule(&mut self, _after_ms: u32) {}
        fn cancel(&mut self) {}
    }

    fn animator(now: &Cell<u64>) -> Animator<TestClock<'_>, TestAlarm> {
        Animator::new(TestClock(now), TestAlarm)
    }

    const BOUNDS: Rect = Rect::new(0, 0, 128, 64);

    fn view(value_ms: u64, length_ms: i64, chrono: bool) -> FaceView {
        FaceView {
            value_ms,
            length_ms,
            chrono,
            mode: ControlMode::Counting,
            parts: TimeParts::from_ms(value_ms),
        }
    }

    fn drawing() -> Drawing {
        Drawing::new(BOUNDS, AnimationConfig::default())
    }

    #[test]
    fn test_progress_angle_countdown() {
        assert_eq!(view(60_000, 60_000, false).progress_angle(), 0);
        assert_eq!(view(30_000, 60_000, false).progress_angle(), TRIG_MAX_ANGLE / 2);
        assert_eq!(view(15_000, 60_000, false).progress_angle(), TRIG_MAX_ANGLE * 3 / 4);
        assert_eq!(view(0, 0, false).progress_angle(), 0);
    }

    #[test]
    fn test_progress_angle_chrono_wraps_each_minute() {
        assert_eq!(view(15_000, 60_000, true).progress_angle(), TRIG_MAX_ANGLE / 4);
        assert_eq!(view(75_000, 60_000, true).progress_angle(), TRIG_MAX_ANGLE / 4);
        assert_eq!(view(120_000, 60_000, true).progress_angle(), 0);
    }

    #[test]
    fn test_from_timer() {
        let timer = Timer::with_length(90_000);
        let v = FaceView::from_timer(&timer, ControlMode::EditMinutes, 0);
        assert_eq!(v.value_ms, 90_000);
        assert_eq!(v.length_ms, 90_000);
        assert!(!v.chrono);
        assert_eq!(v.parts.minutes, 1);
        assert_eq!(v.parts.seconds, 30);
    }

    #[test]
    fn test_small_change_is_set_directly() {
        let now = Cell::new(0);
        let mut anim = animator(&now);
        let mut d = drawing();

        // One second of a one hour countdown is a tiny slice of the ring
        d.update(&mut anim, &view(3_599_000, 3_600_000, false)).unwrap();
        assert_eq!(d.progress_angle(), 18);
        assert!(!anim.is_animating(PROGRESS_ANGLE));
    }

    #[test]
    fn test_large_change_animates() {
        let now = Cell::new(0);
        let mut anim = animator(&now);
        let mut d = drawing();

        let half = view(30_000, 60_000, false);
        d.update(&mut anim, &half).unwrap();
        assert_eq!(d.progress_angle(), 0);
        assert!(anim.is_animating(PROGRESS_ANGLE));

        // Same target again does not restart the animation
        now.set(100);
        d.update(&mut anim, &half).unwrap();
        assert_eq!(anim.registry().get(PROGRESS_ANGLE.into()).unwrap().start_ms, 0);

        now.set(10_000);
        anim.tick(&mut d);
        assert_eq!(d.progress_angle(), TRIG_MAX_ANGLE / 2);
        assert!(!anim.is_animating(PROGRESS_ANGLE));
    }

    #[test]
    fn test_small_change_cancels_running_animation() {
        let now = Cell::new(0);
        let mut anim = animator(&now);
        let mut d = drawing();

        d.update(&mut anim, &view(30_000, 60_000, false)).unwrap();
        d.set_value(PROGRESS_ANGLE.into(), Value::Scalar(TRIG_MAX_ANGLE / 2 - 10));
        d.update(&mut anim, &view(29_990, 60_000, false)).unwrap();

        assert!(!anim.is_animating(PROGRESS_ANGLE));
        assert_eq!(d.progress_angle(), view(29_990, 60_000, false).progress_angle());
    }

    #[test]
    fn test_bounce_returns_home() {
        let now = Cell::new(0);
        let mut anim = animator(&now);
        let mut d = drawing();
        let home = d.home_frame();

        d.start_bounce(&mut anim, true).unwrap();
        assert_eq!(d.text_frame(), home.offset(0, -4));

        now.set(1_000);
        anim.tick(&mut d);
        assert_eq!(d.text_frame(), home);

        d.start_bounce(&mut anim, false).unwrap();
        assert_eq!(d.text_frame(), home.offset(0, 4));
    }

    #[test]
    fn test_reset_waits_for_delay() {
        let now = Cell::new(0);
        let mut anim = animator(&now);
        let mut d = drawing();

        d.start_reset(&mut anim).unwrap();
        assert_eq!(d.ring_inset(), RING_WIDTH as i32);

        now.set(100);
        anim.tick(&mut d);
        assert_eq!(d.ring_inset(), RING_WIDTH as i32);

        now.set(150 + 200);
        anim.tick(&mut d);
        assert!(d.ring_inset() < RING_WIDTH as i32);
        assert!(d.ring_inset() > 0);

        now.set(2_000);
        anim.tick(&mut d);
        assert_eq!(d.ring_inset(), 0);
        assert_eq!(anim.active_count(), 0);
    }

    #[test]
    fn test_animatable_ignores_unknown_targets() {
        let mut d = drawing();
        assert_eq!(d.value(ScalarHandle(9).into()), None);
        d.set_value(RING_INSET.into(), Value::Rect(BOUNDS));
        assert_eq!(d.ring_inset(), 0);
    }

    #[test]
    fn test_render_ring_and_cover() {
        let mut d = drawing();
        let mut frame = FrameBuffer::new();
        let v = view(60_000, 60_000, false);

        d.render(&mut frame, &v).unwrap();
        let ring_top = Rect::new(0, 0, 128, RING_WIDTH);
        assert_eq!(frame.count_lit(ring_top), 128 * RING_WIDTH as usize);
        // Plate is dark apart from the digits
        assert_eq!(frame.pixel(RING_WIDTH + 1, RING_WIDTH + 1), Color::Black);

        // A quarter wedge darkens the top left of the ring
        d.set_value(PROGRESS_ANGLE.into(), Value::Scalar(TRIG_MAX_ANGLE / 4));
        d.render(&mut frame, &v).unwrap();
        assert_eq!(frame.pixel(10, 2), Color::Black);
        assert_eq!(frame.pixel(118, 2), Color::White);
        assert_eq!(frame.pixel(118, 60), Color::White);
    }

    #[test]
    fn test_render_full_cover_hides_ring() {
        let mut d = drawing();
        let mut frame = FrameBuffer::new();
        d.set_value(PROGRESS_ANGLE.into(), Value::Scalar(TRIG_MAX_ANGLE));
        d.render(&mut frame, &view(0, 60_000, false)).unwrap();
        assert_eq!(frame.count_lit(Rect::new(0, 0, 128, RING_WIDTH)), 0);
    }

    #[test]
    fn test_render_collapsed_ring() {
        let mut d = drawing();
        let mut frame = FrameBuffer::new();
        d.set_value(RING_INSET.into(), Value::Scalar(RING_WIDTH as i32));
        d.render(&mut frame, &view(60_000, 60_000, false)).unwrap();
        assert_eq!(frame.count_lit(Rect::new(0, 0, 128, RING_WIDTH)), 0);
    }
}
