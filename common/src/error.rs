use core::fmt;

/// Start-up failures that nothing in software can recover from. The
/// firmware reports them and halts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FatalError {
    /// The display did not answer on the I2C bus.
    DisplayNotFound,
    /// The queue and its shared context could not be set up.
    QueueUnavailable,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DisplayNotFound => f.write_str("SSD1306 allocation failed"),
            Self::QueueUnavailable => f.write_str("failed to create queue"),
        }
    }
}
