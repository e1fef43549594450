//! Display flush task
//!
//! Ships frames rendered by the controller to the SH1106 and switches the
//! panel on and off.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;

use tickring_core::config::DisplayConfig;

use crate::channels::{DISPLAY_POWER, FRAME, FRAME_READY};
use crate::display::Sh1106;

/// The panel as wired on the board
pub type Display = Sh1106<I2c<'static, I2C0, Async>>;

/// Display task - flushes frames to the OLED
#[embassy_executor::task]
pub async fn display_task(mut display: Display, config: DisplayConfig) {
    info!("Display task started");

    if let Err(e) = display.init(config.contrast).await {
        error!("Display init failed: {:?}", e);
    }
    if config.inverted {
        if let Err(e) = display.set_inverted(true).await {
            warn!("Failed to invert display: {:?}", e);
        }
    }

    loop {
        match select(FRAME_READY.wait(), DISPLAY_POWER.wait()).await {
            Either::First(()) => {
                // Copy out so rendering is not blocked by the I2C transfer
                let pages = {
                    let mut frame = FRAME.lock().await;
                    if !frame.is_dirty() {
                        continue;
                    }
                    frame.mark_clean();
                    *frame.pages()
                };

                if let Err(e) = display.flush(&pages).await {
                    warn!("Display flush failed: {:?}", e);
                }
            }
            Either::Second(on) => {
                debug!("Display power: {}", on);
                if let Err(e) = display.set_display_on(on).await {
                    warn!("Failed to switch display: {:?}", e);
                }
            }
        }
    }
}
