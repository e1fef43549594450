//! Tickring - Watch Timer Firmware
//!
//! Main firmware binary for RP2040-based wearables: a countdown timer that
//! turns into a stopwatch once it runs out, shown as an animated progress
//! ring around the remaining time.
//!
//! Four buttons (Back, Up, Select, Down) edit and run the timer, a
//! vibration motor announces expiry, and a 128x64 SH1106 OLED shows the
//! face.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use tickring_core::config::WatchConfig;
use tickring_core::geometry::Rect;
use tickring_core::traits::Clock;
use tickring_display::{FRAME_HEIGHT, FRAME_WIDTH};
use tickring_hal::gpio::ActiveLevel;
use tickring_hal_rp2040::flash::Rp2040FlashStorage;
use tickring_hal_rp2040::gpio::{Rp2040Input, Rp2040Output};

use crate::config::{parse_config, ConfigPersistence};
use crate::controller::Controller;
use crate::display::Sh1106;
use crate::platform::{SignalAlarm, SignalHaptics, UptimeClock};

/// Embedded default configuration (compiled into firmware)
/// Edit watch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../watch.toml");

/// OLED I2C clock
const DISPLAY_I2C_HZ: u32 = 400_000;

mod channels;
mod config;
mod controller;
mod display;
mod platform;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tickring firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load configuration and the saved timer from flash
    let flash_storage = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    let mut persistence = ConfigPersistence::new(flash_storage);

    let config = match persistence.load().await {
        Ok(config) => config,
        Err(_) => {
            // Flash empty or invalid - use embedded defaults
            info!("No valid configuration in flash, using embedded defaults");
            create_default_config()
        }
    };

    let clock = UptimeClock;
    let timer = persistence.load_timer(clock.now_ms()).await;
    let storage = persistence.into_storage();

    // Buttons pull the line low when pressed
    // Pin assignments are board-specific (Back=GPIO2, Up=GPIO3, Select=GPIO4, Down=GPIO5)
    let buttons: tasks::ButtonPins = [
        ActiveLevel::new(Rp2040Input::new(Input::new(p.PIN_2, Pull::Up)), true),
        ActiveLevel::new(Rp2040Input::new(Input::new(p.PIN_3, Pull::Up)), true),
        ActiveLevel::new(Rp2040Input::new(Input::new(p.PIN_4, Pull::Up)), true),
        ActiveLevel::new(Rp2040Input::new(Input::new(p.PIN_5, Pull::Up)), true),
    ];

    // Vibration motor driver on GPIO15
    let vibe_pin = Rp2040Output::new(Output::new(p.PIN_15, Level::Low));

    info!("GPIO initialized");

    // Setup I2C0 for the OLED (SDA=GPIO16, SCL=GPIO17)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_17, p.PIN_16, Irqs, i2c_config);
    let display = Sh1106::new(i2c);

    info!("I2C initialized for display");

    let bounds = Rect::new(0, 0, FRAME_WIDTH as i16, FRAME_HEIGHT as i16);
    let controller = Controller::new(
        timer,
        &config,
        bounds,
        clock,
        SignalAlarm,
        SignalHaptics,
    );

    // Spawn tasks
    spawner.spawn(tasks::alarm_task()).unwrap();
    spawner.spawn(tasks::vibe_task(vibe_pin)).unwrap();
    spawner.spawn(tasks::storage_task(storage)).unwrap();
    spawner
        .spawn(tasks::display_task(display, config.display))
        .unwrap();
    spawner
        .spawn(tasks::buttons_task(buttons, config.buttons))
        .unwrap();
    spawner.spawn(tasks::controller_task(controller)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Create the embedded default configuration
///
/// Parses the watch.toml file that was embedded at compile time.
/// This is used as a fallback when no flash config exists.
fn create_default_config() -> WatchConfig {
    let parsed = parse_config(EMBEDDED_CONFIG).map_err(|e| {
        error!("Failed to parse embedded config: {:?}", e);
    });

    match parsed {
        Ok(config) if config.validate().is_ok() => {
            info!("Parsed embedded configuration successfully");
            crate::config::loader::log_config_summary(&config);
            config
        }
        _ => {
            // build.rs checks watch.toml, so this only happens with a
            // parser/validator mismatch
            error!("Using built-in default configuration");
            WatchConfig::default()
        }
    }
}
