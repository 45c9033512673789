//! Active/Suspended switching.
//!
//! The executor has no task suspension, so each long-lived task checks a
//! [`TaskGate`] at its safe points and parks there while the gate is closed.

use core::sync::atomic::{
    AtomicBool,
    Ordering,
};

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    signal::Signal,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Panel lit, sampler and renderer running.
    Active,
    /// Panel dark, sampler and renderer parked.
    Suspended,
}

impl PowerState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Suspended,
            Self::Suspended => Self::Active,
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Open/closed flag one task waits on. One waiter per gate.
pub(crate) struct TaskGate {
    open: AtomicBool,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl TaskGate {
    pub const fn new(open: bool) -> Self {
        Self {
            open: AtomicBool::new(open),
            wake: Signal::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
        self.wake.signal(());
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
        self.wake.reset();
    }

    /// Returns immediately if open, otherwise parks until [`open`](Self::open).
    pub async fn wait_open(&self) {
        while !self.is_open() {
            self.wake.wait().await;
        }
    }
}

/// Power state plus the gates of the two tasks it governs.
pub struct PowerSwitch {
    active: AtomicBool,
    pub(crate) sampler: TaskGate,
    pub(crate) renderer: TaskGate,
}

impl PowerSwitch {
    pub const fn new(initial: PowerState) -> Self {
        let active = initial.is_active();
        Self {
            active: AtomicBool::new(active),
            sampler: TaskGate::new(active),
            renderer: TaskGate::new(active),
        }
    }

    pub fn state(&self) -> PowerState {
        if self.active.load(Ordering::Acquire) {
            PowerState::Active
        } else {
            PowerState::Suspended
        }
    }

    /// Park the sampler, then the renderer.
    pub(crate) fn suspend_tasks(&self) {
        self.active.store(false, Ordering::Release);
        self.sampler.close();
        self.renderer.close();
    }

    /// Release the renderer, then the sampler.
    pub(crate) fn resume_tasks(&self) {
        self.active.store(true, Ordering::Release);
        self.renderer.open();
        self.sampler.open();
    }
}
