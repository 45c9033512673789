//! The long-lived tasks, and the power loop that runs in `main`.

use climate_panel_common::{
    Climate,
    Context,
    PowerState,
    Render,
    SampleError,
    config::{
        CLIMATE_QUEUE_CAPACITY,
        PRESS_QUEUE_CAPACITY,
    },
};
use defmt::{
    Debug2Format,
    Format,
    debug,
    error,
    info,
    warn,
};
use embassy_time::Timer;

use crate::{
    Button,
    ClimateSensor,
    Display,
};

pub type ClimateContext = Context<Display<'static>, Climate, CLIMATE_QUEUE_CAPACITY>;
pub type PressContext = Context<Display<'static>, u32, PRESS_QUEUE_CAPACITY>;

/// Reads the sensor every sample interval and queues good readings.
///
/// Waits on a full queue rather than dropping. Parks while suspended.
#[embassy_executor::task]
pub async fn sampler_task(ctx: &'static ClimateContext, mut sensor: ClimateSensor) {
    info!("Sampler task started");

    loop {
        match ctx.sample_cycle(&mut sensor).await {
            Ok(climate) => debug!("Sampled {}", climate),
            Err(SampleError::Sensor(fault)) => {
                warn!("Failed to read from DHT sensor: {}", fault);
            }
            Err(SampleError::Invalid {
                temperature,
                humidity,
            }) => {
                warn!("DHT sensor returned invalid reading: {} C, {} %", temperature, humidity);
            }
        }
    }
}

#[embassy_executor::task]
pub async fn climate_render_task(ctx: &'static ClimateContext) {
    info!("Climate render task started");
    render_loop(ctx).await;
}

/// Counts debounced presses and queues the running count.
#[embassy_executor::task]
pub async fn press_poll_task(ctx: &'static PressContext, mut button: Button) {
    info!("Press task started, press the button");

    let mut count: u32 = 0;
    loop {
        button.wait_press().await;
        count = count.wrapping_add(1);
        debug!("Press #{}", count);
        ctx.queue.push(count).await;
    }
}

#[embassy_executor::task]
pub async fn count_render_task(ctx: &'static PressContext) {
    info!("Count render task started");
    render_loop(ctx).await;
}

async fn render_loop<T, const N: usize>(ctx: &Context<Display<'static>, T, N>) -> !
where
    T: Render + Format,
{
    loop {
        match ctx.render_cycle().await {
            (item, Ok(())) => debug!("Rendered {}", item),
            (_, Err(e)) => error!("Display update failed: {}", Debug2Format(&e)),
        }
    }
}

/// Low-rate loop that turns latched presses into power transitions.
pub async fn power_loop(ctx: &ClimateContext) -> ! {
    loop {
        match ctx.poll_power().await {
            Some(Ok(PowerState::Active)) => {
                info!("Power: display on, sampling resumed ({} presses)", ctx.input().accepted());
            }
            Some(Ok(PowerState::Suspended)) => {
                info!("Power: display off, sampling suspended ({} presses)", ctx.input().accepted());
            }
            Some(Err(e)) => error!("Display power command failed: {}", Debug2Format(&e)),
            None => {}
        }

        Timer::after(ctx.config().power_tick).await;
    }
}
