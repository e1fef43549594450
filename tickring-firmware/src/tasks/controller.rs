//! Main controller task
//!
//! Owns the watch face controller, and with it the animator, the timer and
//! the drawing layer. Receives button events, animation ticks and refresh
//! deadlines, renders frames, and forwards persistence and panel power
//! requests.

use defmt::*;
use embassy_futures::select::{select4, Either4};
use embassy_time::Timer;

use tickring_core::animation::AnimationError;

use crate::channels::{
    ANIMATION_TICK, DISPLAY_POWER, FRAME, FRAME_READY, INPUT_CHANNEL, PERSIST_CMD, REDRAW,
};
use crate::controller::{Controller, Response};
use crate::platform::{request_redraw, SignalAlarm, SignalHaptics, UptimeClock};

/// The controller wired to the embassy collaborators
pub type FaceController = Controller<UptimeClock, SignalAlarm, SignalHaptics>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut controller: FaceController) {
    info!("Controller task started in {:?}", controller.mode());

    controller.register_update_callback(request_redraw);
    if let Err(e) = controller.start() {
        registry_full(e);
    }
    render(&controller).await;

    loop {
        let refresh_in = controller.next_refresh_in_ms();
        let refresh = async move {
            match refresh_in {
                Some(ms) => Timer::after_millis(ms as u64).await,
                None => core::future::pending::<()>().await,
            }
        };

        let result = match select4(
            INPUT_CHANNEL.receive(),
            ANIMATION_TICK.wait(),
            refresh,
            REDRAW.wait(),
        )
        .await
        {
            Either4::First(event) => {
                debug!("Input: {:?}", event);
                let result = controller.handle_button(event.button, event.action);
                debug!("Mode: {:?}", controller.mode());
                result
            }
            Either4::Second(()) => {
                // Redraws come back through the update callback
                let report = controller.on_animation_tick();
                trace!(
                    "Animation tick: {} stepped, {} done, {} left",
                    report.stepped,
                    report.completed,
                    report.remaining
                );
                Ok(Response::default())
            }
            Either4::Third(()) => controller.on_refresh(),
            Either4::Fourth(()) => Ok(Response {
                redraw: true,
                ..Default::default()
            }),
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => registry_full(e),
        };

        if let Some(on) = response.display_on {
            DISPLAY_POWER.signal(on);
        }
        if let Some(record) = response.persist {
            PERSIST_CMD.signal(record);
        }
        if response.redraw {
            render(&controller).await;
        }
    }
}

/// The face starts fewer animations than the registry holds, so this is a bug
fn registry_full(e: AnimationError) -> ! {
    defmt::panic!("Animation registry exhausted: {:?}", e)
}

/// Render the face into the shared frame and hand it to the display task
async fn render(controller: &FaceController) {
    {
        let mut frame = FRAME.lock().await;
        if let Err(e) = controller.render(&mut *frame) {
            warn!("Render failed: {:?}", e);
        }
    }
    FRAME_READY.signal(());
}
