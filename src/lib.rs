//! # climate-panel
//!
//! Firmware for an ESP32-S3 with:
//! - **Display**: 128×64 SSD1306 OLED over I2C at 0x3C
//! - **Button**: the boot button, active low with internal pull-up
//! - **Sensor**: DHT22 temperature/humidity sensor on a single data line
//!
//! The hardware-independent rules (debouncing, queueing, rendering, power
//! switching) live in [`climate_panel_common`]; this crate wires them to the
//! board and runs them as embassy tasks.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = climate_panel::init();
//! let resources = climate_panel::split_resources!(peripherals);
//!
//! climate_panel::app::run_climate_monitor(spawner, resources, peripherals.IO_MUX, CLIMATE_MONITOR).await
//! ```

#![no_std]

pub mod app;
mod button;
mod display;
mod sensor;
pub mod tasks;

pub use button::{
    Button,
    PRESSES,
};
pub use climate_panel_common as common;
pub use display::Display;
use esp_hal::{
    assign_resources,
    clock::CpuClock,
};
pub use sensor::{
    ClimateSensor,
    SensorFault,
};

/// StaticCell helper: moves a value into a `static`, once.
///
/// Yields `None` if this call site already ran, instead of panicking.
#[macro_export]
macro_rules! try_mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.try_init($val).map(|x| &*x)
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            sda: GPIO8,
            scl: GPIO9,
            i2c: I2C0,
        },
        button: ButtonResources<'d> {
            pin: GPIO0,
        },
        sensor: SensorResources<'d> {
            data: GPIO4,
        }
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Initialise the chip and return the raw peripheral set.
///
/// Call this once at the top of `main`, then use [`split_resources!`] to
/// break the peripherals into typed resource groups.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}
