//! Bounded FIFO between one producer task and one consumer task.

#[cfg(test)]
use embassy_sync::channel::TrySendError;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::Channel,
};

/// Fixed-capacity queue. `push` waits while full, `pop` waits while empty.
///
/// A full queue is back-pressure, not an error: the producer simply waits
/// for the consumer to catch up.
pub struct BoundedQueue<T, const N: usize> {
    channel: Channel<CriticalSectionRawMutex, T, N>,
}

impl<T, const N: usize> BoundedQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Append `item` at the tail, waiting for a free slot.
    pub async fn push(&self, item: T) {
        self.channel.send(item).await;
    }

    /// Remove the head, waiting for an item.
    pub async fn pop(&self) -> T {
        self.channel.receive().await
    }

}

#[cfg(test)]
impl<T, const N: usize> BoundedQueue<T, N> {
    /// Append without waiting. Hands the item back if the queue is full.
    pub(crate) fn try_push(&self, item: T) -> Result<(), T> {
        self.channel.try_send(item).map_err(|TrySendError::Full(item)| item)
    }

    pub(crate) fn try_pop(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    pub(crate) fn len(&self) -> usize {
        self.channel.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub(crate) const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> Default for BoundedQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
