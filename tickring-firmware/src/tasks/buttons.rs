//! Button polling task
//!
//! Samples the four button pins every poll period and feeds each level to
//! its decoder. Decoded actions go to the controller over `INPUT_CHANNEL`.

use defmt::*;
use embassy_time::{Duration, Ticker};

use tickring_core::config::ButtonConfig;
use tickring_drivers::input::{ButtonDecoder, HoldBehavior};
use tickring_hal::gpio::ActiveLevel;
use tickring_hal_rp2040::gpio::Rp2040Input;

use crate::channels::{Button, ButtonEvent, INPUT_CHANNEL};

/// Button pins in `Button::ALL` order (Back, Up, Select, Down)
pub type ButtonPins = [ActiveLevel<Rp2040Input<'static>>; 4];

/// What holding each button does
fn hold_behavior(button: Button) -> HoldBehavior {
    match button {
        Button::Back => HoldBehavior::Click,
        Button::Up | Button::Down => HoldBehavior::Repeating,
        Button::Select => HoldBehavior::LongPress,
    }
}

/// Buttons task - debounces and decodes the buttons
#[embassy_executor::task]
pub async fn buttons_task(pins: ButtonPins, config: ButtonConfig) {
    info!("Buttons task started (poll every {} ms)", config.poll_ms);

    let mut decoders = Button::ALL.map(|button| ButtonDecoder::new(hold_behavior(button), config));
    let mut ticker = Ticker::every(Duration::from_millis(config.poll_ms as u64));

    loop {
        ticker.next().await;

        for ((button, pin), decoder) in Button::ALL.iter().zip(pins.iter()).zip(decoders.iter_mut()) {
            if let Some(action) = decoder.update(pin.is_active(), config.poll_ms) {
                let event = ButtonEvent {
                    button: *button,
                    action,
                };
                trace!("Button: {:?}", event);
                if INPUT_CHANNEL.try_send(event).is_err() {
                    warn!("Input channel full, dropping {:?}", event);
                }
            }
        }
    }
}
