//! Edge filtering for a mechanical push-button.
//!
//! Two flavours. [`PressInput`] is lock-free and allocation-free so it can be
//! called from a GPIO interrupt handler: it only timestamps, compares and
//! sets a flag, and the real work happens later in a normal task.
//! [`debounce_press_and_release`] is for a task that owns the pin: it waits
//! out the bounce after every edge and confirms the level before moving on.

use core::sync::atomic::{
    AtomicBool,
    AtomicU32,
    Ordering,
};

use embassy_time::{
    Duration,
    Instant,
    Timer,
};
use embedded_hal::digital::{
    ErrorType,
    InputPin,
};
use embedded_hal_async::digital::Wait;

/// Accepts an edge only if more than `window` has passed since the last
/// accepted one.
///
/// Timestamps are kept as wrapping `u32` milliseconds because the target has
/// no 64-bit atomics. Intended for a single writer.
pub(crate) struct EdgeFilter {
    window_ms: u32,
    last_ms: AtomicU32,
    seen: AtomicBool,
}

impl EdgeFilter {
    pub const fn new(window: Duration) -> Self {
        Self {
            window_ms: window.as_millis() as u32,
            last_ms: AtomicU32::new(0),
            seen: AtomicBool::new(false),
        }
    }

    /// Returns `true` if the edge at `now` counts as a new logical press.
    pub fn accept(&self, now: Instant) -> bool {
        let now_ms = now.as_millis() as u32;

        if self.seen.load(Ordering::Acquire) {
            let elapsed = now_ms.wrapping_sub(self.last_ms.load(Ordering::Relaxed));
            if elapsed <= self.window_ms {
                return false;
            }
        }

        self.last_ms.store(now_ms, Ordering::Relaxed);
        self.seen.store(true, Ordering::Release);
        true
    }
}

/// A one-slot "something happened" flag, set from interrupt context and
/// consumed by a polling loop.
pub(crate) struct PressLatch(AtomicBool);

impl PressLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clears the latch, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for PressLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounced button input: filter, latch and a running count of accepted
/// presses. Lives in a `static` so the interrupt handler can reach it.
pub struct PressInput {
    filter: EdgeFilter,
    latch: PressLatch,
    accepted: AtomicU32,
}

impl PressInput {
    pub const fn new(window: Duration) -> Self {
        Self {
            filter: EdgeFilter::new(window),
            latch: PressLatch::new(),
            accepted: AtomicU32::new(0),
        }
    }

    /// Feed one raw edge. Returns `true` if it was accepted as a press.
    pub fn record_edge(&self, now: Instant) -> bool {
        if !self.filter.accept(now) {
            return false;
        }
        self.accepted.fetch_add(1, Ordering::Relaxed);
        self.latch.set();
        true
    }

    /// Consume a pending press, if any.
    pub fn take_press(&self) -> bool {
        self.latch.take()
    }

    /// Number of presses accepted since boot.
    pub fn accepted(&self) -> u32 {
        self.accepted.load(Ordering::Relaxed)
    }
}

/// Wait for a debounced press (falling edge, active low).
pub(crate) async fn debounce_press<P>(button: &mut P, settle: Duration) -> Result<(), <P as ErrorType>::Error>
where
    P: Wait + InputPin,
{
    loop {
        button.wait_for_falling_edge().await?;
        Timer::after(settle).await;
        if button.is_low()? {
            return Ok(());
        }
    }
}

/// Wait for a debounced release (rising edge).
pub(crate) async fn debounce_release<P>(button: &mut P, settle: Duration) -> Result<(), <P as ErrorType>::Error>
where
    P: Wait + InputPin,
{
    loop {
        button.wait_for_rising_edge().await?;
        Timer::after(settle).await;
        if button.is_high()? {
            return Ok(());
        }
    }
}

/// Wait for one full press-and-release cycle. Bounces on either edge are
/// absorbed, so one physical press completes exactly one call.
pub async fn debounce_press_and_release<P>(
    button: &mut P,
    settle: Duration,
) -> Result<(), <P as ErrorType>::Error>
where
    P: Wait + InputPin,
{
    debounce_press(button, settle).await?;
    debounce_release(button, settle).await
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embassy_futures::{
        block_on,
        select::{
            Either,
            select,
        },
    };

    use super::*;
    use crate::config::DEBOUNCE_WINDOW;

    /// Active-low line that replays `(ms after start, level)` edges in real
    /// time. Edges that happen while nobody waits are missed, like a pin whose
    /// edge interrupt is only armed inside `wait_for_*`.
    struct ScriptedButton {
        start: Instant,
        edges: Vec<(u64, bool)>,
    }

    impl ScriptedButton {
        fn new(edges: &[(u64, bool)]) -> Self {
            Self {
                start: Instant::now(),
                edges: edges.to_vec(),
            }
        }

        fn elapsed_ms(&self) -> u64 {
            self.start.elapsed().as_millis()
        }

        fn level(&self) -> bool {
            let now = self.elapsed_ms();
            self.edges
                .iter()
                .take_while(|(t, _)| *t <= now)
                .last()
                .is_none_or(|(_, high)| *high)
        }

        async fn next_edge(&self, to_high: bool) {
            let now = self.elapsed_ms();
            match self.edges.iter().find(|(t, high)| *t > now && *high == to_high) {
                Some((t, _)) => Timer::at(self.start + Duration::from_millis(*t)).await,
                None => core::future::pending().await,
            }
        }
    }

    impl ErrorType for ScriptedButton {
        type Error = Infallible;
    }

    impl InputPin for ScriptedButton {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level())
        }
    }

    impl Wait for ScriptedButton {
        async fn wait_for_high(&mut self) -> Result<(), Infallible> {
            if !self.level() {
                self.next_edge(true).await;
            }
            Ok(())
        }

        async fn wait_for_low(&mut self) -> Result<(), Infallible> {
            if self.level() {
                self.next_edge(false).await;
            }
            Ok(())
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
            self.next_edge(true).await;
            Ok(())
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
            self.next_edge(false).await;
            Ok(())
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
            let level = self.level();
            self.next_edge(!level).await;
            Ok(())
        }
    }

    /// Runs one press-and-release wait, giving up after `timeout_ms`.
    fn completes_within(button: &mut ScriptedButton, timeout_ms: u64) -> bool {
        let wait = debounce_press_and_release(button, DEBOUNCE_WINDOW);
        let timeout = Timer::after(Duration::from_millis(timeout_ms));
        matches!(block_on(select(wait, timeout)), Either::First(Ok(())))
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn first_edge_is_always_accepted() {
        let filter = EdgeFilter::new(Duration::from_millis(50));
        assert!(filter.accept(at(3)));
    }

    #[test]
    fn bounce_burst_yields_one_press() {
        let filter = EdgeFilter::new(Duration::from_millis(50));
        let accepted = [1000, 1002, 1007, 1019, 1033, 1048]
            .into_iter()
            .filter(|&t| filter.accept(at(t)))
            .count();
        assert_eq!(accepted, 1);
    }

    #[test]
    fn edge_exactly_at_window_is_rejected() {
        let filter = EdgeFilter::new(Duration::from_millis(50));
        assert!(filter.accept(at(100)));
        assert!(!filter.accept(at(150)));
        assert!(filter.accept(at(151)));
    }

    #[test]
    fn window_restarts_from_last_accepted_edge() {
        let filter = EdgeFilter::new(Duration::from_millis(50));
        assert!(filter.accept(at(0)));
        // Rejected edges do not move the reference point.
        assert!(!filter.accept(at(40)));
        assert!(filter.accept(at(60)));
        assert!(!filter.accept(at(100)));
        assert!(filter.accept(at(111)));
    }

    #[test]
    fn at_most_one_press_per_window_for_dense_edges() {
        let filter = EdgeFilter::new(Duration::from_millis(50));
        let mut last_accepted: Option<u64> = None;
        // Edges every 7 ms for two seconds.
        for t in (0..2000).step_by(7) {
            if filter.accept(at(t)) {
                if let Some(prev) = last_accepted {
                    assert!(t - prev > 50, "accepted {prev} and {t}");
                }
                last_accepted = Some(t);
            }
        }
        assert!(last_accepted.is_some());
    }

    #[test]
    fn survives_millisecond_counter_wrap() {
        let filter = EdgeFilter::new(Duration::from_millis(50));
        let before_wrap = u64::from(u32::MAX) - 10;
        assert!(filter.accept(at(before_wrap)));
        assert!(!filter.accept(at(before_wrap + 30)));
        assert!(filter.accept(at(before_wrap + 61)));
    }

    #[test]
    fn latch_is_consumed_once() {
        let latch = PressLatch::new();
        assert!(!latch.take());
        latch.set();
        latch.set();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn bouncy_press_completes_once() {
        // Press bounces at 5..9 ms, release at 300 ms bounces at 302..304 ms.
        let mut button = ScriptedButton::new(&[
            (5, false),
            (7, true),
            (9, false),
            (300, true),
            (302, false),
            (304, true),
        ]);

        assert!(completes_within(&mut button, 1000));
        // Not on the press bounce at 7 ms, only after the release settled.
        assert!(button.elapsed_ms() >= 300 + DEBOUNCE_WINDOW.as_millis());

        // The release bounce is not a second press.
        assert!(!completes_within(&mut button, 150));
    }

    #[test]
    fn glitch_shorter_than_settle_time_is_not_a_press() {
        let mut button = ScriptedButton::new(&[(5, false), (8, true)]);
        assert!(!completes_within(&mut button, 200));
    }

    #[test]
    fn two_separate_presses_complete_twice() {
        let mut button = ScriptedButton::new(&[
            (5, false),
            (100, true),
            (200, false),
            (202, true),
            (204, false),
            (320, true),
        ]);

        assert!(completes_within(&mut button, 1000));
        assert!(completes_within(&mut button, 1000));
        assert!(button.elapsed_ms() >= 320);
    }

    #[test]
    fn press_input_counts_and_latches_accepted_edges() {
        let input = PressInput::new(Duration::from_millis(50));
        assert!(input.record_edge(at(0)));
        assert!(!input.record_edge(at(20)));
        assert!(input.take_press());
        assert!(!input.take_press());

        assert!(input.record_edge(at(100)));
        assert_eq!(input.accepted(), 2);
        assert!(input.take_press());
    }
}
