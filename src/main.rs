//! RustMorseBeacon - Firmware entry point
//!
//! Drives a GPIO key line (devkit LED or TX key) from a MorsePlayer
//! in a fixed-period tick loop, draining the log ring in between.

#![no_std]
#![no_main]

use esp_idf_svc::sys as esp_idf_sys;

use rust_morse_beacon::{
    beacon_error, beacon_info,
    config::PlayerConfig,
    logging::BeaconLog,
    player::MorsePlayer,
};

/// Key line GPIO number (LED on most devkits).
const KEY_GPIO: i32 = 2;

/// Tick period in milliseconds (one FreeRTOS tick at the default
/// 100 Hz tick rate).
const TICK_MS: u32 = 10;

/// Message announced on boot.
const BOOT_MESSAGE: &str = "CQ CQ DE BEACON";

// Static allocations: player and log ring live for the program's
// lifetime, no per-message allocation.
static LOG: BeaconLog = BeaconLog::new();

#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    // Key line as plain push-pull output, starting released.
    unsafe {
        esp_idf_sys::gpio_set_direction(KEY_GPIO, esp_idf_sys::gpio_mode_t_GPIO_MODE_OUTPUT);
        esp_idf_sys::gpio_set_level(KEY_GPIO, 0);
    }

    let mut player: MorsePlayer = MorsePlayer::new(PlayerConfig::default());
    match player.set_message(BOOT_MESSAGE, true) {
        Ok(()) => beacon_info!(LOG, 0, "beacon up, repeating '{}'", BOOT_MESSAGE),
        Err(e) => beacon_error!(LOG, 0, "boot message rejected: {}", e),
    }

    // Only touch the pin on edges; the player emits a level per tick.
    let mut last_level = false;
    let mut key = |on: bool| {
        if on != last_level {
            last_level = on;
            unsafe {
                esp_idf_sys::gpio_set_level(KEY_GPIO, on as u32);
            }
        }
    };

    let mut uptime_ms: u32 = 0;
    loop {
        player.update(TICK_MS, &mut key);
        uptime_ms = uptime_ms.wrapping_add(TICK_MS);

        if uptime_ms % 60_000 == 0 {
            beacon_info!(
                LOG,
                uptime_ms,
                "uptime {} s, {} log entries dropped",
                uptime_ms / 1000,
                LOG.dropped()
            );
        }

        drain_logs();

        unsafe {
            esp_idf_sys::vTaskDelay(1);
        }
    }
}

/// Write queued log entries to the console.
///
/// Runs outside the tick-critical section of the loop; blocking here
/// is acceptable.
fn drain_logs() {
    use rust_morse_beacon::logging::LogLevel;

    while let Some(entry) = LOG.drain() {
        // printf needs a terminated level string; entry.msg is printed
        // with an explicit length instead.
        let level: &[u8] = match entry.level {
            LogLevel::Error => b"ERROR\0",
            LogLevel::Warn => b"WARN\0",
            LogLevel::Info => b"INFO\0",
            LogLevel::Debug => b"DEBUG\0",
        };
        unsafe {
            esp_idf_sys::printf(
                b"[%8u] %-5s %.*s\n\0".as_ptr() as *const core::ffi::c_char,
                entry.timestamp_ms,
                level.as_ptr() as *const core::ffi::c_char,
                entry.len as i32,
                entry.msg.as_ptr() as *const core::ffi::c_char,
            );
        }
    }
}
