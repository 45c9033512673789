//! SSD1306 display driver: 128×64 OLED over I2C.

use climate_panel_common::{
    FatalError,
    config::DISPLAY_I2C_ADDRESS,
};
use defmt::error;
use esp_hal::{
    Blocking,
    i2c::master::{
        Config,
        I2c,
    },
    time::Rate,
};
use ssd1306::{
    I2CDisplayInterface,
    Ssd1306,
    prelude::*,
};

use crate::DisplayResources;

/// The panel, framebuffered and ready to draw on with `embedded-graphics`.
pub type Display<'a> =
    Ssd1306<I2CInterface<I2c<'a, Blocking>>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

impl<'a> TryFrom<DisplayResources<'a>> for Display<'a> {
    type Error = FatalError;

    /// Brings up the bus and initialises the controller. A panel that does
    /// not answer is fatal.
    fn try_from(res: DisplayResources<'a>) -> Result<Self, FatalError> {
        let i2c = I2c::new(res.i2c, Config::default().with_frequency(Rate::from_khz(400)))
            .map_err(|e| {
                error!("I2C config rejected: {}", defmt::Debug2Format(&e));
                FatalError::DisplayNotFound
            })?
            .with_sda(res.sda)
            .with_scl(res.scl);

        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDRESS);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        display.init().map_err(|e| {
            error!("SSD1306 init failed: {}", defmt::Debug2Format(&e));
            FatalError::DisplayNotFound
        })?;
        Ok(display)
    }
}
