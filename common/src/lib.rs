//! # climate-panel-common
//!
//! The parts of the climate panel firmware that do not touch hardware:
//! - **Debounce**: interrupt-safe edge filter and press latch, and async
//!   settle-and-confirm helpers for a task that owns the pin
//! - **Queue**: bounded FIFO between a producer task and a consumer task
//! - **Readings**: climate samples and press counts, and their text layout
//! - **Sampler**: one validated read from a [`Hygrometer`]
//! - **Panel**: the monochrome display seam, with an SSD1306 implementation
//! - **Power**: the Active/Suspended switch and the gates that park tasks
//! - **Context**: the state shared by every task, and each task's loop body
//!
//! Everything here builds on the host, so the firmware's coordination rules
//! are unit tested without a board.

#![cfg_attr(not(test), no_std)]

pub mod config;
mod context;
mod debounce;
mod error;
mod panel;
mod power;
mod queue;
mod reading;
mod sampler;

pub use config::Config;
pub use context::Context;
pub use debounce::{
    PressInput,
    debounce_press_and_release,
};
pub use error::FatalError;
pub use panel::{
    Panel,
    draw_banner,
};
pub use power::{
    PowerState,
    PowerSwitch,
};
pub use queue::BoundedQueue;
pub use reading::{
    Climate,
    Render,
};
pub use sampler::{
    Hygrometer,
    SampleError,
};
