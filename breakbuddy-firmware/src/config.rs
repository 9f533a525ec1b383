//! Device configuration
//!
//! breakbuddy.toml is compiled into the firmware and parsed at boot. The
//! build script has already checked it, so a parse failure here means the
//! file and the parser disagree.

use defmt::*;

use breakbuddy_core::config::{parse_config, DeviceConfig, ParseError};

/// Embedded configuration (edit breakbuddy.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../breakbuddy.toml");

/// Firmware build time, seconds since the Unix epoch
const BUILD_EPOCH_S: &str = env!("BREAKBUDDY_BUILD_EPOCH_S");

/// Parse the embedded configuration
///
/// An unset boot time (`epoch_at_boot_s = 0`) is replaced with the build
/// time, so the clock starts close to right when flashed straight after
/// building.
pub fn load_config() -> Result<DeviceConfig, ParseError> {
    let mut config = parse_config(EMBEDDED_CONFIG)?;

    if config.clock.epoch_at_boot_s == 0 {
        match BUILD_EPOCH_S.parse::<u64>() {
            Ok(epoch_s) => {
                info!("Clock seeded from build time ({} s)", epoch_s);
                config.clock.epoch_at_boot_s = epoch_s;
            }
            Err(_) => warn!("Build time unavailable, clock left unset"),
        }
    }

    Ok(config)
}
