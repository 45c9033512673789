//! Climate monitor that keeps the display dark after the boot banner until
//! the first button press, and prints readings with one decimal.

#![no_std]
#![no_main]

use climate_panel::{
    app,
    common::config::CLIMATE_MONITOR_REFINED,
    split_resources,
};
use defmt::info;
use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = climate_panel::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Climate monitor (refined) starting");
    app::run_climate_monitor(spawner, resources, peripherals.IO_MUX, CLIMATE_MONITOR_REFINED).await
}
