//! Wall clock from the uptime counter
//!
//! The Pico W has no battery-backed RTC. The time at power-on comes from
//! configuration (or the firmware build time) and the embassy time driver
//! supplies the uptime added to it.
//!
//! # Known limitation
//!
//! Nothing ever corrects this clock: there is no network time sync and no
//! RTC. Every reset starts again from the configured boot time, so a device
//! that reboots (or is flashed and left unpowered for a while) reports the
//! wrong local hour until `epoch_at_boot_s` is updated and the firmware is
//! rebuilt. Crystal error also adds a slow drift of a few seconds a day.
//! The work-hours gate is only as right as this clock.

use breakbuddy_core::traits::{Clock, ClockError, WallTime};
use embassy_time::Instant;

/// Clock seeded with the epoch time at boot
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UptimeClock {
    boot_epoch_ms: u64,
    utc_offset_minutes: i16,
}

impl UptimeClock {
    /// Create a clock; a zero boot time leaves the clock unset
    pub fn new(epoch_at_boot_s: u64, utc_offset_minutes: i16) -> Self {
        Self {
            boot_epoch_ms: epoch_at_boot_s.saturating_mul(1000),
            utc_offset_minutes,
        }
    }

    /// Wall time after `uptime_ms` of running
    pub fn at_uptime(&self, uptime_ms: u64) -> Result<WallTime, ClockError> {
        if self.boot_epoch_ms == 0 {
            return Err(ClockError::NotSet);
        }
        Ok(WallTime::from_epoch_ms(
            self.boot_epoch_ms + uptime_ms,
            self.utc_offset_minutes,
        ))
    }
}

impl Clock for UptimeClock {
    fn now(&self) -> Result<WallTime, ClockError> {
        self.at_uptime(Instant::now().as_millis())
    }
}
