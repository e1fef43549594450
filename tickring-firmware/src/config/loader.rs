//! Configuration persistence
//!
//! Loads the watch configuration and the saved timer from flash storage.
//! Falls back to embedded defaults if flash is empty.

use core::str;
use defmt::*;

use tickring_core::config::{ConfigIssue, WatchConfig, CONFIG_VERSION};
use tickring_core::timer::{Timer, TimerRecord};
use tickring_hal::FlashError;
use tickring_hal_rp2040::flash::Rp2040FlashStorage;
// Import the FlashStorage trait to bring methods into scope
use tickring_hal_rp2040::{FlashStorageTrait, StorageKey};

use super::toml::parse_config;

/// Maximum serialized config size (binary)
const MAX_CONFIG_SIZE: usize = 256;

/// Maximum TOML config size
const MAX_TOML_SIZE: usize = 2048;

/// Serialized timer record size
pub const TIMER_RECORD_SIZE: usize = 32;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// TOML parsing failed
    TomlParse,
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// Config version mismatch
    VersionMismatch,
    /// Values the firmware cannot run with
    Invalid(ConfigIssue),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

impl From<ConfigIssue> for ConfigError {
    fn from(issue: ConfigIssue) -> Self {
        match issue {
            ConfigIssue::UnsupportedVersion => ConfigError::VersionMismatch,
            other => ConfigError::Invalid(other),
        }
    }
}

/// Configuration persistence manager
///
/// Handles loading the watch configuration and timer state from flash.
pub struct ConfigPersistence<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    /// Create a new config persistence manager
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Consume this persistence manager and return the underlying storage
    ///
    /// The storage task keeps writing timer records through it.
    pub fn into_storage(self) -> Rp2040FlashStorage<'d> {
        self.storage
    }

    /// Load configuration from flash
    ///
    /// Tries to load TOML config first, falls back to binary postcard format.
    /// Returns the loaded config, or an error if not found or invalid.
    pub async fn load(&mut self) -> Result<WatchConfig, ConfigError> {
        info!("Loading configuration from flash...");

        // Try TOML first
        match self.load_toml().await {
            Ok(config) => {
                info!("Loaded configuration from TOML");
                return Ok(config);
            }
            Err(ConfigError::Flash(FlashError::NotFound)) => {
                debug!("No TOML config found, trying binary format");
            }
            Err(e) => {
                warn!("Failed to load TOML config: {:?}, trying binary", e);
            }
        }

        // Fall back to binary postcard format
        self.load_binary().await
    }

    /// Restore the timer saved when the face was last left
    ///
    /// A missing or unreadable record gives a fresh timer.
    pub async fn load_timer(&mut self, now_ms: u64) -> Timer {
        let mut buffer = [0u8; TIMER_RECORD_SIZE];
        let len = match self.storage.read(StorageKey::TimerState, &mut buffer).await {
            Ok(len) => len,
            Err(FlashError::NotFound) => {
                info!("No saved timer, starting fresh");
                return Timer::new();
            }
            Err(e) => {
                warn!("Failed to read timer state: {:?}", e);
                return Timer::new();
            }
        };

        let restored = postcard::from_bytes::<TimerRecord>(&buffer[..len])
            .ok()
            .and_then(|record| Timer::from_record(&record, now_ms));

        match restored {
            Some(timer) => {
                info!(
                    "Restored timer: {} ms left, paused={}",
                    timer.value_ms(now_ms),
                    timer.is_paused()
                );
                timer
            }
            None => {
                warn!("Saved timer is corrupt or from another version, discarding");
                Timer::new()
            }
        }
    }

    /// Load configuration from TOML format
    async fn load_toml(&mut self) -> Result<WatchConfig, ConfigError> {
        // Read raw TOML data from flash
        let mut buffer = [0u8; MAX_TOML_SIZE];
        let len = self
            .storage
            .read(StorageKey::WatchConfigToml, &mut buffer)
            .await?;

        debug!("Read {} bytes of TOML from flash", len);

        // Convert to string
        let toml_str = str::from_utf8(&buffer[..len]).map_err(|_| ConfigError::InvalidUtf8)?;

        // Parse TOML
        let config = parse_config(toml_str).map_err(|e| {
            warn!("TOML parse error: {:?}", e);
            ConfigError::TomlParse
        })?;
        config.validate()?;

        log_config_summary(&config);
        Ok(config)
    }

    /// Load configuration from binary postcard format
    async fn load_binary(&mut self) -> Result<WatchConfig, ConfigError> {
        // Read raw data from flash
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self
            .storage
            .read(StorageKey::WatchConfig, &mut buffer)
            .await?;

        debug!("Read {} bytes of binary config from flash", len);

        // Deserialize with postcard
        let config: WatchConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;

        // Version check
        if config.version != CONFIG_VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                config.version, CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }
        config.validate()?;

        log_config_summary(&config);
        Ok(config)
    }
}

/// Log a summary of the loaded configuration
pub fn log_config_summary(config: &WatchConfig) {
    info!("Configuration loaded successfully");
    debug!("  animation tick {} ms", config.animation.tick_interval_ms);
    debug!(
        "  buttons: poll {} ms, repeat {} ms, long press {} ms",
        config.buttons.poll_ms, config.buttons.repeat_ms, config.buttons.long_press_ms
    );
    debug!(
        "  alarm: enabled={}, window {} ms",
        config.alarm.enabled, config.alarm.window_ms
    );
}
