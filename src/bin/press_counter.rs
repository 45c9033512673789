//! Counts button presses and shows the running count on the OLED.

#![no_std]
#![no_main]

use climate_panel::{
    app,
    common::config::PRESS_COUNTER,
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

    info!("Press counter starting");
    app::run_press_counter(spawner, resources, PRESS_COUNTER).await
}
