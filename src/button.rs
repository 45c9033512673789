//! The push-button: boot button, active low, internal pull-up.
//!
//! Two ways to use it. [`Button::wait_press`] owns the pin and waits out
//! bounces on both edges, for the press counter. [`Button::listen`] hands
//! the pin to a GPIO interrupt handler that only timestamps the edge and
//! latches a press for the power loop to pick up.

use core::cell::RefCell;

use climate_panel_common::{
    PressInput,
    config::DEBOUNCE_WINDOW,
    debounce_press_and_release,
};
use critical_section::Mutex;
use embassy_time::Instant;
use esp_hal::{
    gpio::{
        Event,
        Input,
        InputConfig,
        Io,
        Pull,
    },
    handler,
};

use crate::ButtonResources;

/// Debounced presses, written by the interrupt handler.
pub static PRESSES: PressInput = PressInput::new(DEBOUNCE_WINDOW);

// Needed inside the handler only to acknowledge the interrupt.
static BUTTON: Mutex<RefCell<Option<Input<'static>>>> = Mutex::new(RefCell::new(None));

pub struct Button {
    pin: Input<'static>,
}

impl From<ButtonResources<'static>> for Button {
    fn from(res: ButtonResources<'static>) -> Self {
        Self {
            pin: Input::new(res.pin, InputConfig::default().with_pull(Pull::Up)),
        }
    }
}

impl Button {
    /// Wait for one debounced press-and-release.
    pub async fn wait_press(&mut self) {
        let Ok(()) = debounce_press_and_release(&mut self.pin, DEBOUNCE_WINDOW).await;
    }

    /// Move the pin into the GPIO interrupt handler. Every falling edge is
    /// fed to [`PRESSES`].
    pub fn listen(self, io: &mut Io<'_>) {
        io.set_interrupt_handler(on_edge);

        let mut pin = self.pin;
        critical_section::with(|cs| {
            pin.listen(Event::FallingEdge);
            BUTTON.borrow_ref_mut(cs).replace(pin);
        });
    }
}

#[handler]
fn on_edge() {
    critical_section::with(|cs| {
        if let Some(pin) = BUTTON.borrow_ref_mut(cs).as_mut() {
            pin.clear_interrupt();
        }
    });
    PRESSES.record_edge(Instant::now());
}
