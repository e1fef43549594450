//! Timer persistence task
//!
//! Writes the newest timer record to flash. Records that arrive while a
//! write is in progress collapse into one, since only the latest matters.

use defmt::*;

use tickring_hal_rp2040::flash::Rp2040FlashStorage;
use tickring_hal_rp2040::{FlashStorageTrait, StorageKey};

use crate::channels::PERSIST_CMD;
use crate::config::loader::TIMER_RECORD_SIZE;

/// Storage task - saves timer state
#[embassy_executor::task]
pub async fn storage_task(mut storage: Rp2040FlashStorage<'static>) {
    info!("Storage task started");

    loop {
        let record = PERSIST_CMD.wait().await;

        let mut buffer = [0u8; TIMER_RECORD_SIZE];
        let bytes = match postcard::to_slice(&record, &mut buffer) {
            Ok(bytes) => bytes,
            Err(_) => {
                error!("Failed to serialize timer record");
                continue;
            }
        };

        match storage.write(StorageKey::TimerState, bytes).await {
            Ok(()) => debug!("Timer state saved ({} bytes)", bytes.len()),
            Err(e) => warn!("Failed to save timer state: {:?}", e),
        }
    }
}
