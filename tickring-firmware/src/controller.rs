//! Watch face controller
//!
//! The controller is the central brain that:
//! - Turns button actions into timer edits and mode changes
//! - Starts the face animations
//! - Raises the expiry alarm
//! - Decides when the face next needs refreshing
//!
//! It owns the animator, so every animation is started and ticked from the
//! controller task. Hardware effects leave through the `Alarm` and
//! `Haptics` collaborators and through the returned [`Response`].

use tickring_core::animation::{AnimationError, Animator, TickReport};
use tickring_core::config::{AlarmConfig, WatchConfig};
use tickring_core::geometry::Rect;
use tickring_core::state::{ControlMode, Event};
use tickring_core::timer::{Timer, TimerRecord, ALARM_PATTERN, MS_PER_SECOND};
use tickring_core::traits::{Alarm, Clock, Haptics};
use tickring_display::{Color, DisplayBackend, DisplayError, Drawing, FaceView};
use tickring_drivers::input::ButtonAction;

use crate::channels::Button;

/// What the controller task should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// The face changed and needs rendering
    pub redraw: bool,
    /// Timer state to store
    pub persist: Option<TimerRecord>,
    /// New panel power state
    pub display_on: Option<bool>,
}

impl Response {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Default::default()
        }
    }
}

/// Controller state for the watch face
pub struct Controller<C: Clock, A: Alarm, H: Haptics> {
    /// Which field the buttons edit
    mode: ControlMode,
    timer: Timer,
    drawing: Drawing,
    animator: Animator<C, A>,
    haptics: H,
    alarm: AlarmConfig,
    /// The face was left with Back; the display is off
    asleep: bool,
}

impl<C: Clock, A: Alarm, H: Haptics> Controller<C, A, H> {
    /// Create a controller for `timer`, laid out for a display of `bounds`
    pub fn new(
        timer: Timer,
        config: &WatchConfig,
        bounds: Rect,
        clock: C,
        alarm: A,
        haptics: H,
    ) -> Self {
        let now = clock.now_ms();
        let mode = ControlMode::initial(timer.is_paused(), timer.time_parts(now).hours);
        Self {
            mode,
            timer,
            drawing: Drawing::new(bounds, config.animation),
            animator: Animator::with_tick_interval(clock, alarm, config.animation.tick_interval_ms),
            haptics,
            alarm: config.alarm,
            asleep: false,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Set the callback run after every animation tick that moved something
    pub fn register_update_callback(&mut self, callback: fn()) {
        self.animator.register_update_callback(callback);
    }

    /// Bring the face in line with the restored timer
    pub fn start(&mut self) -> Result<(), AnimationError> {
        let now = self.now_ms();
        self.refresh_face(now)
    }

    /// Handle one decoded button action
    pub fn handle_button(
        &mut self,
        button: Button,
        action: ButtonAction,
    ) -> Result<Response, AnimationError> {
        let now = self.now_ms();

        if self.asleep {
            return match action {
                ButtonAction::Click | ButtonAction::LongPress => self.wake(now),
                ButtonAction::Pressed | ButtonAction::Repeat => Ok(Response::default()),
            };
        }

        match (button, action) {
            (Button::Up | Button::Down, ButtonAction::Click | ButtonAction::Repeat) => {
                if self.rewind_if_vibrating(now) {
                    return self.refreshed(now);
                }
                let Some(step) = self.mode.step_ms() else {
                    return Ok(Response::default());
                };

                let upward = button == Button::Up;
                self.timer.increment(if upward { step } else { -step }, now);
                if action == ButtonAction::Click {
                    self.drawing.start_bounce(&mut self.animator, upward)?;
                }
                self.refreshed(now)
            }

            (Button::Select, ButtonAction::Pressed) => {
                self.haptics.cancel();
                self.drawing.start_reset(&mut self.animator)?;
                Ok(Response::redraw())
            }

            (Button::Select, ButtonAction::Click) => {
                if self.rewind_if_vibrating(now) {
                    return self.refreshed(now);
                }

                let toggles = self.mode.select_toggles_timer();
                self.mode = self.mode.transition(Event::Select);
                if toggles {
                    self.timer.toggle_play_pause(now);
                }
                let mut response = self.refreshed(now)?;
                if toggles {
                    response.persist = Some(self.timer.to_record(now));
                }
                Ok(response)
            }

            (Button::Select, ButtonAction::LongPress) => {
                self.timer.reset();
                self.mode = self.mode.transition(Event::Reset);
                let mut response = self.refreshed(now)?;
                response.persist = Some(self.timer.to_record(now));
                Ok(response)
            }

            (Button::Back, ButtonAction::Click) => {
                self.haptics.cancel();
                let has_hours = self.timer.time_parts(now).hours > 0;
                if self.mode.exits_on_back(has_hours) {
                    return Ok(self.sleep(now));
                }
                self.mode = self.mode.transition(Event::Back { has_hours });
                self.refreshed(now)
            }

            _ => Ok(Response::default()),
        }
    }

    /// Step the animations; call when the animation alarm fires
    pub fn on_animation_tick(&mut self) -> TickReport {
        self.animator.tick(&mut self.drawing)
    }

    /// Periodic refresh: raise the alarm on expiry and move the ring
    pub fn on_refresh(&mut self) -> Result<Response, AnimationError> {
        let now = self.now_ms();
        let mut woke = false;

        if self.timer.check_elapsed(now) && self.alarm.enabled {
            self.haptics.vibrate(ALARM_PATTERN.truncated(self.alarm.window_ms));
            if self.asleep {
                self.asleep = false;
                self.mode = self.initial_mode(now);
                woke = true;
            }
        }

        if self.asleep {
            return Ok(Response::default());
        }

        let mut response = self.refreshed(now)?;
        if woke {
            response.display_on = Some(true);
        }
        Ok(response)
    }

    /// Delay until the next periodic refresh, or `None` when nothing changes
    ///
    /// While counting the face refreshes on every displayed second. A running
    /// countdown left behind with Back still wakes the face when it expires.
    pub fn next_refresh_in_ms(&self) -> Option<u32> {
        let now = self.now_ms();

        if self.asleep {
            if self.timer.is_paused() || !self.alarm.enabled || self.timer.is_chrono(now) {
                return None;
            }
            // Expiry is when fewer than one whole second remains
            let until = self.timer.raw_value_ms(now) - (MS_PER_SECOND - 1);
            return Some(until.clamp(1, u32::MAX as i64) as u32);
        }

        (self.mode == ControlMode::Counting).then(|| self.timer.ms_until_next_second(now))
    }

    /// Draw the face, or a blank screen while asleep
    pub fn render<B: DisplayBackend + ?Sized>(&self, backend: &mut B) -> Result<(), DisplayError> {
        if self.asleep {
            return backend.clear(Color::Black);
        }
        let view = self.view(self.now_ms());
        self.drawing.render(backend, &view)
    }

    fn now_ms(&self) -> u64 {
        self.animator.clock().now_ms()
    }

    fn view(&self, now_ms: u64) -> FaceView {
        FaceView::from_timer(&self.timer, self.mode, now_ms)
    }

    fn initial_mode(&self, now_ms: u64) -> ControlMode {
        ControlMode::initial(self.timer.is_paused(), self.timer.time_parts(now_ms).hours)
    }

    fn refresh_face(&mut self, now_ms: u64) -> Result<(), AnimationError> {
        let view = self.view(now_ms);
        self.drawing.update(&mut self.animator, &view)
    }

    fn refreshed(&mut self, now_ms: u64) -> Result<Response, AnimationError> {
        self.refresh_face(now_ms)?;
        Ok(Response::redraw())
    }

    /// A button pressed while the alarm buzzes silences it and rewinds
    fn rewind_if_vibrating(&mut self, now_ms: u64) -> bool {
        if !self.timer.is_vibrating(now_ms, self.alarm.window_ms) {
            return false;
        }
        self.haptics.cancel();
        self.timer.rewind();
        self.mode = self.mode.transition(Event::Rewind);
        true
    }

    fn sleep(&mut self, now_ms: u64) -> Response {
        self.asleep = true;
        self.animator.stop_all();
        Response {
            redraw: true,
            persist: Some(self.timer.to_record(now_ms)),
            display_on: Some(false),
        }
    }

    fn wake(&mut self, now_ms: u64) -> Result<Response, AnimationError> {
        self.asleep = false;
        self.mode = self.initial_mode(now_ms);
        let mut response = self.refreshed(now_ms)?;
        response.display_on = Some(true);
        Ok(response)
    }
}
