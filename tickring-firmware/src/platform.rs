//! Core collaborator traits implemented over embassy
//!
//! The controller task owns the animator, so these adapters never block:
//! they only post commands to the tasks that own the hardware.

use embassy_time::Instant;

use tickring_core::traits::{Alarm, Clock, Haptics, VibePattern};

use crate::channels::{AlarmCommand, VibeCommand, ALARM_CMD, REDRAW, VIBE_CMD};

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// One-shot alarm served by the alarm task
#[derive(Debug, Default)]
pub struct SignalAlarm;

impl Alarm for SignalAlarm {
    fn schedule(&mut self, after_ms: u32) {
        ALARM_CMD.signal(AlarmCommand::Arm(after_ms));
    }

    fn cancel(&mut self) {
        ALARM_CMD.signal(AlarmCommand::Cancel);
    }
}

/// Vibration served by the vibe task
#[derive(Debug, Default)]
pub struct SignalHaptics;

impl Haptics for SignalHaptics {
    fn vibrate(&mut self, pattern: VibePattern) {
        VIBE_CMD.signal(VibeCommand::Play(pattern));
    }

    fn cancel(&mut self) {
        VIBE_CMD.signal(VibeCommand::Cancel);
    }
}

/// Animator update callback: ask the controller task for a new frame
pub fn request_redraw() {
    REDRAW.signal(());
}
