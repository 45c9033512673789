//! Start-up sequences for the firmware variants.
//!
//! Display first (a missing panel halts), then the banner, the button, the
//! shared context with its queue (failure halts), and finally the tasks.

use climate_panel_common::{
    Config,
    Context,
    FatalError,
    draw_banner,
};
use defmt::{
    Debug2Format,
    error,
    info,
};
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    gpio::Io,
    peripherals::IO_MUX,
};

use crate::{
    Button,
    ClimateSensor,
    Display,
    PRESSES,
    Resources,
    tasks::{
        self,
        ClimateContext,
        PressContext,
    },
    try_mk_static,
};

const BANNER: &str = "Hello, world!";

/// Terminal state for unrecoverable start-up failures. Needs a reset.
pub fn halt(err: FatalError) -> ! {
    error!("Halted: {}", err);
    loop {
        core::hint::spin_loop();
    }
}

/// Iteration (a): count button presses and show the count.
pub async fn run_press_counter(spawner: Spawner, resources: Resources<'static>, config: Config) -> ! {
    let mut display = Display::try_from(resources.display).unwrap_or_else(|err| halt(err));
    Timer::after(config.boot_pause).await;
    show_banner(&mut display);

    let button: Button = resources.button.into();

    let Some(ctx) = try_mk_static!(PressContext, Context::new(display, &PRESSES, config)) else {
        halt(FatalError::QueueUnavailable)
    };

    spawner.must_spawn(tasks::press_poll_task(ctx, button));
    spawner.must_spawn(tasks::count_render_task(ctx));
    info!("Press counter running");

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}

/// Iterations (b) and (c): sample the sensor, show readings, toggle power
/// with the button.
pub async fn run_climate_monitor(
    spawner: Spawner,
    resources: Resources<'static>,
    io_mux: IO_MUX<'static>,
    config: Config,
) -> ! {
    let mut display = Display::try_from(resources.display).unwrap_or_else(|err| halt(err));
    Timer::after(config.boot_pause).await;
    show_banner(&mut display);

    let mut io = Io::new(io_mux);
    Button::from(resources.button).listen(&mut io);
    let sensor: ClimateSensor = resources.sensor.into();

    let Some(ctx) = try_mk_static!(ClimateContext, Context::new(display, &PRESSES, config)) else {
        halt(FatalError::QueueUnavailable)
    };
    if let Err(e) = ctx.apply_initial_power().await {
        error!("Display power command failed: {}", Debug2Format(&e));
    }
    info!("Initial power state: {}", ctx.power.state());

    spawner.must_spawn(tasks::sampler_task(ctx, sensor));
    spawner.must_spawn(tasks::climate_render_task(ctx));
    info!("Climate monitor running");

    tasks::power_loop(ctx).await
}

fn show_banner(display: &mut Display<'static>) {
    if let Err(e) = draw_banner(display, BANNER) {
        error!("Banner failed: {}", Debug2Format(&e));
    }
}
