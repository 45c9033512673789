//! Compile-time configuration. There is no runtime configuration.

use embassy_time::Duration;

use crate::PowerState;

/// Logical canvas of the OLED panel.
pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;

/// I2C address of the SSD1306 controller.
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;

/// Two edges closer than this are one logical press.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(50);

/// Queue depth for press counts.
pub const PRESS_QUEUE_CAPACITY: usize = 10;

/// Queue depth for climate samples. Kept small so the panel never shows a
/// backlog of stale readings.
pub const CLIMATE_QUEUE_CAPACITY: usize = 2;

/// Settings that differ between firmware variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Power state entered right after the boot banner.
    pub initial_power: PowerState,
    /// Digits after the decimal point when printing readings.
    pub decimals: usize,
    /// Time between two sensor reads.
    pub sample_interval: Duration,
    /// Minimum time a rendered frame stays on screen.
    pub min_update_interval: Duration,
    /// How often the power loop checks for a pending press.
    pub power_tick: Duration,
    /// How long the blank panel is held after init, before the banner.
    pub boot_pause: Duration,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            initial_power: PowerState::Active,
            decimals: 2,
            sample_interval: Duration::from_millis(5000),
            min_update_interval: Duration::from_millis(2000),
            power_tick: Duration::from_millis(10),
            boot_pause: Duration::from_millis(2000),
        }
    }

    #[must_use]
    pub const fn with_initial_power(mut self, state: PowerState) -> Self {
        self.initial_power = state;
        self
    }

    #[must_use]
    pub const fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Press counter: every debounced release is counted and shown.
pub const PRESS_COUNTER: Config = Config::new();

/// Climate monitor: starts Active, prints readings with two decimals.
pub const CLIMATE_MONITOR: Config = Config::new();

/// Refined climate monitor: panel goes dark after the banner until the
/// first press, readings printed with one decimal.
pub const CLIMATE_MONITOR_REFINED: Config = Config::new()
    .with_initial_power(PowerState::Suspended)
    .with_decimals(1);
