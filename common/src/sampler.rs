//! One sensor read, validated.

use crate::Climate;

/// A temperature/humidity sensor.
pub trait Hygrometer {
    type Error;

    /// Read `(temperature °C, relative humidity %)`.
    fn read(&mut self) -> Result<(f32, f32), Self::Error>;
}

/// Why a sample was skipped. Always transient: the next cycle reads again.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError<E> {
    /// The driver reported a fault.
    Sensor(E),
    /// The driver returned a value that is not a number.
    Invalid { temperature: f32, humidity: f32 },
}

/// Take one reading. Faulted reads never produce a [`Climate`].
pub(crate) fn sample<H: Hygrometer>(sensor: &mut H) -> Result<Climate, SampleError<H::Error>> {
    let (temperature, humidity) = sensor.read().map_err(SampleError::Sensor)?;
    Climate::new(temperature, humidity).ok_or(SampleError::Invalid {
        temperature,
        humidity,
    })
}
