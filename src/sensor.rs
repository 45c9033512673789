//! DHT22 temperature/humidity sensor on a single open-drain data line.

use climate_panel_common::Hygrometer;
use dht22_sensor::{
    Dht22,
    DhtError,
};
use esp_hal::{
    delay::Delay,
    gpio::{
        DriveMode,
        Flex,
        OutputConfig,
        Pull,
    },
};

use crate::SensorResources;

/// Why the DHT22 did not deliver a reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum SensorFault {
    Checksum,
    Timeout,
    Pin,
}

/// The DHT22, driven by bit-banging its data line.
///
/// A read blocks for about 5 ms; the sensor needs 2 s between reads.
pub struct ClimateSensor {
    driver: Dht22<Flex<'static>, Delay>,
}

impl From<SensorResources<'static>> for ClimateSensor {
    fn from(res: SensorResources<'static>) -> Self {
        let mut data = Flex::new(res.data);
        data.apply_output_config(
            &OutputConfig::default()
                .with_drive_mode(DriveMode::OpenDrain)
                .with_pull(Pull::Up),
        );
        data.set_input_enable(true);
        data.set_output_enable(true);
        data.set_high();

        Self {
            driver: Dht22::new(data, Delay::new()),
        }
    }
}

impl Hygrometer for ClimateSensor {
    type Error = SensorFault;

    fn read(&mut self) -> Result<(f32, f32), SensorFault> {
        match self.driver.read() {
            Ok(reading) => Ok((reading.temperature, reading.relative_humidity)),
            Err(DhtError::ChecksumMismatch) => Err(SensorFault::Checksum),
            Err(DhtError::Timeout) => Err(SensorFault::Timeout),
            Err(_) => Err(SensorFault::Pin),
        }
    }
}
