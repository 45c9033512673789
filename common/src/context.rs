//! State shared by every task, and the body of each task's loop.
//!
//! The firmware tasks are thin: they call [`Context::sample_cycle`] or
//! [`Context::render_cycle`] forever and log what comes back, so the timing
//! of both loops is exercised on the host.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    mutex::Mutex,
};
use embassy_time::Timer;

use crate::{
    BoundedQueue,
    Climate,
    Config,
    Hygrometer,
    Panel,
    PowerState,
    PowerSwitch,
    PressInput,
    Render,
    SampleError,
    panel::render,
    sampler::sample,
};

/// Everything the tasks share, built once at start-up and handed to every
/// task by reference.
///
/// The panel sits behind a mutex so the renderer and the power loop never
/// drive it at the same time. The renderer only draws while its gate is
/// open, and checks that under the lock; the power loop closes the gate
/// before taking the lock to switch the panel off. Together that means no
/// frame is ever pushed to a dark panel.
pub struct Context<P, T, const N: usize> {
    pub queue: BoundedQueue<T, N>,
    pub power: PowerSwitch,
    panel: Mutex<CriticalSectionRawMutex, P>,
    input: &'static PressInput,
    config: Config,
}

impl<P, T, const N: usize> Context<P, T, N>
where
    P: Panel,
    T: Render,
{
    pub fn new(panel: P, input: &'static PressInput, config: Config) -> Self {
        Self {
            queue: BoundedQueue::new(),
            power: PowerSwitch::new(config.initial_power),
            panel: Mutex::new(panel),
            input,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn input(&self) -> &PressInput {
        self.input
    }

    /// Bring the panel in line with the initial power state.
    pub async fn apply_initial_power(&self) -> Result<(), P::Error> {
        let on = self.power.state().is_active();
        self.panel.lock().await.power(on)
    }

    /// One renderer iteration: wait while suspended, pop the next item,
    /// draw it, then hold the frame for the minimum update interval.
    ///
    /// Hands back the item with the draw result so the caller can log both.
    pub async fn render_cycle(&self) -> (T, Result<(), P::Error>) {
        self.power.renderer.wait_open().await;
        let item = self.queue.pop().await;
        let result = self.present(&item).await;
        Timer::after(self.config.min_update_interval).await;
        (item, result)
    }

    /// Draw `item`, waiting first while the renderer is suspended.
    async fn present(&self, item: &T) -> Result<(), P::Error> {
        loop {
            self.power.renderer.wait_open().await;

            let mut panel = self.panel.lock().await;
            if self.power.renderer.is_open() {
                return render(&mut *panel, item, self.config.decimals);
            }
        }
    }

    /// Flip the power state.
    ///
    /// Active → Suspended: park sampler, park renderer, wait out any frame in
    /// flight, panel off. Suspended → Active: panel on, release renderer,
    /// release sampler. The state flips even if the panel command fails;
    /// the error is returned for the caller to report.
    async fn toggle_power(&self) -> Result<PowerState, P::Error> {
        match self.power.state() {
            PowerState::Active => {
                self.power.suspend_tasks();
                let result = self.panel.lock().await.power(false);
                result.map(|()| PowerState::Suspended)
            }
            PowerState::Suspended => {
                let result = self.panel.lock().await.power(true);
                self.power.resume_tasks();
                result.map(|()| PowerState::Active)
            }
        }
    }

    /// One tick of the power loop: toggle if a press is pending.
    pub async fn poll_power(&self) -> Option<Result<PowerState, P::Error>> {
        if self.input.take_press() {
            Some(self.toggle_power().await)
        } else {
            None
        }
    }

    /// Run `f` with exclusive access to the panel.
    #[cfg(test)]
    async fn with_panel<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let mut panel = self.panel.lock().await;
        f(&mut panel)
    }
}

impl<P, const N: usize> Context<P, Climate, N>
where
    P: Panel,
{
    /// One sampler iteration: sleep one sample interval, wait while
    /// suspended, read, and queue the reading if it is good.
    ///
    /// A full queue makes this wait rather than drop the reading. Faulted
    /// reads are returned and nothing is queued.
    pub async fn sample_cycle<H: Hygrometer>(&self, sensor: &mut H) -> Result<Climate, SampleError<H::Error>> {
        Timer::after(self.config.sample_interval).await;
        self.power.sampler.wait_open().await;

        let climate = sample(sensor)?;
        self.queue.push(climate).await;
        Ok(climate)
    }
}
