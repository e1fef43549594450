//! Vibration motor task
//!
//! Plays patterns requested through `VIBE_CMD`. The task sleeps until the
//! current segment ends or a new command arrives, whichever is first.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};

use tickring_core::traits::Haptics;
use tickring_drivers::haptics::VibeMotor;
use tickring_hal::gpio::OutputPin;
use tickring_hal_rp2040::gpio::Rp2040Output;

use crate::channels::{VibeCommand, VIBE_CMD};

/// Vibe task - switches the motor according to the playing pattern
#[embassy_executor::task]
pub async fn vibe_task(mut pin: Rp2040Output<'static>) {
    info!("Vibe task started");

    let mut motor = VibeMotor::new();
    let mut segment_start = Instant::now();
    pin.set_low();

    loop {
        let wait_ms = motor.remaining_in_segment_ms();
        let segment_end = async move {
            match wait_ms {
                Some(ms) => Timer::after_millis(ms as u64).await,
                None => core::future::pending::<()>().await,
            }
        };

        match select(VIBE_CMD.wait(), segment_end).await {
            Either::First(VibeCommand::Play(pattern)) => {
                debug!("Vibe: playing {} segments", pattern.segments.len());
                motor.vibrate(pattern);
                segment_start = Instant::now();
            }
            Either::First(VibeCommand::Cancel) => {
                if motor.is_active() {
                    debug!("Vibe: cancelled");
                }
                motor.cancel();
            }
            Either::Second(()) => {
                let now = Instant::now();
                let delta_ms = (now - segment_start).as_millis() as u32;
                segment_start = now;
                motor.update_with_delta(delta_ms);
            }
        }

        pin.set_state(motor.pin_state());
    }
}
