//! ST7735R 1.44" 128x128 panel
//!
//! Pin mapping:
//! - CLK: GPIO14 (SPI1 CLK)
//! - MOSI: GPIO15 (SPI1 TX)
//! - CS: GPIO5
//! - DC: GPIO6
//! - Reset: GPIO7

use breakbuddy_core::traits::SurfaceError;
use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7735s;
use mipidsi::Builder;

/// Visible panel size in pixels
pub const PANEL_SIZE: u16 = 128;

/// The controller's 132x162 frame memory is offset from the glass
const COLUMN_OFFSET: u16 = 2;
const ROW_OFFSET: u16 = 1;

pub type Lcd<'d> = mipidsi::Display<
    SPIInterface<ExclusiveDevice<Spi<'d, SPI1, Blocking>, Output<'d>, NoDelay>, Output<'d>>,
    ST7735s,
    Output<'d>,
>;

/// Reset and initialize the panel
pub fn init_display<'d>(
    spi: Spi<'d, SPI1, Blocking>,
    cs: Output<'d>,
    dc: Output<'d>,
    rst: Output<'d>,
) -> Result<Lcd<'d>, SurfaceError> {
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).map_err(|_| SurfaceError::Bus)?;
    let di = SPIInterface::new(spi_device, dc);

    Builder::new(ST7735s, di)
        .display_size(PANEL_SIZE, PANEL_SIZE)
        .display_offset(COLUMN_OFFSET, ROW_OFFSET)
        .reset_pin(rst)
        .init(&mut embassy_time::Delay)
        .map_err(|_| SurfaceError::Bus)
}

/// SPI configuration for the ST7735R
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 24_000_000;
    config
}
