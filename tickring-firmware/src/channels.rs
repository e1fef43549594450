//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use tickring_core::timer::TimerRecord;
use tickring_core::traits::VibePattern;
use tickring_display::FrameBuffer;
use tickring_drivers::input::ButtonAction;

/// Channel capacity for decoded button events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Physical buttons, in pin order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Back,
    Up,
    Select,
    Down,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Back, Button::Up, Button::Select, Button::Down];
}

/// A decoded action on one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub action: ButtonAction,
}

/// One-shot alarm request for the animation scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmCommand {
    /// Fire after this many milliseconds, replacing any pending expiry
    Arm(u32),
    Cancel,
}

/// Vibration motor request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VibeCommand {
    Play(VibePattern),
    Cancel,
}

/// Button events from the button task
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, ButtonEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Alarm command signal (updated by the animator through `SignalAlarm`)
pub static ALARM_CMD: Signal<CriticalSectionRawMutex, AlarmCommand> = Signal::new();

/// The animation alarm expired; the controller should tick the animator
pub static ANIMATION_TICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Animated values changed and the face needs to be drawn again
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Vibration command signal (updated by the controller through `SignalHaptics`)
pub static VIBE_CMD: Signal<CriticalSectionRawMutex, VibeCommand> = Signal::new();

/// Timer state to write to flash; only the newest record matters
pub static PERSIST_CMD: Signal<CriticalSectionRawMutex, TimerRecord> = Signal::new();

/// Shared frame, rendered by the controller and flushed by the display task
pub static FRAME: Mutex<CriticalSectionRawMutex, FrameBuffer> = Mutex::new(FrameBuffer::new());

/// A new frame is ready in `FRAME`
pub static FRAME_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Panel power (true = on)
pub static DISPLAY_POWER: Signal<CriticalSectionRawMutex, bool> = Signal::new();
