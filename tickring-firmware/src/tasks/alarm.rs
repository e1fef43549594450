//! Animation alarm task
//!
//! Serves the animator's one-shot alarm. A new `Arm` replaces the pending
//! deadline, so at most one expiry is ever outstanding. On expiry the
//! controller is told to tick the animator.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};

use crate::channels::{AlarmCommand, ALARM_CMD, ANIMATION_TICK};

/// Alarm task - one-shot timer for the animation scheduler
#[embassy_executor::task]
pub async fn alarm_task() {
    info!("Alarm task started");

    let mut deadline: Option<Instant> = None;

    loop {
        let pending = deadline;
        let expiry = async move {
            match pending {
                Some(at) => Timer::at(at).await,
                None => core::future::pending::<()>().await,
            }
        };

        match select(ALARM_CMD.wait(), expiry).await {
            Either::First(AlarmCommand::Arm(after_ms)) => {
                trace!("Alarm armed for {} ms", after_ms);
                deadline = Some(Instant::now() + Duration::from_millis(after_ms as u64));
            }
            Either::First(AlarmCommand::Cancel) => {
                trace!("Alarm cancelled");
                deadline = None;
            }
            Either::Second(()) => {
                deadline = None;
                ANIMATION_TICK.signal(());
            }
        }
    }
}
