//! Bounded connection queue between the acceptor and the worker pool.
//!
//! # Responsibilities
//! - Fixed-capacity circular buffer with strict FIFO delivery
//! - Block producers while full, consumers while empty
//! - One-way shutdown switch that broadcast-wakes every blocked task
//!
//! # Design Decisions
//! - Internal state lives behind one `std::sync::Mutex` held only for the
//!   critical section; the guard never crosses an await point
//! - Waiting uses two `tokio::sync::Notify` queues ("not full", "not empty");
//!   waiters register interest via `enable()` *before* re-checking state under
//!   the lock, so a wakeup between unlock and await cannot be lost
//! - Shutdown uses `notify_waiters` (broadcast); normal enqueue/dequeue use
//!   `notify_one` to wake exactly one counterpart
//! - Drain-before-stop: items stored before shutdown are still delivered,
//!   `ShutdownError` is returned only once the queue is empty

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::Notify;

/// Error returned by [`BoundedQueue::dequeue`] once the queue is shut down
/// and fully drained. This is the designed stop signal for consumers, not a
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("queue is shut down")]
pub struct ShutdownError;

/// Error returned by [`BoundedQueue::enqueue`] after shutdown.
///
/// Carries the rejected item back to the caller so ownership is never lost:
/// a failed enqueue leaves the caller responsible for releasing the item.
pub struct EnqueueError<T>(T);

impl<T> EnqueueError<T> {
    /// Recover the item that was not enqueued.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for EnqueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnqueueError(..)")
    }
}

impl<T> fmt::Display for EnqueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is shut down")
    }
}

impl<T> std::error::Error for EnqueueError<T> {}

/// Mutable queue state, guarded by [`BoundedQueue::state`].
struct State<T> {
    /// Ring storage; a slot is `Some` iff it currently holds a queued item.
    slots: Box<[Option<T>]>,
    /// Number of stored items, `0..=capacity`.
    len: usize,
    /// Index of the next item to dequeue when `len > 0`.
    read_idx: usize,
    /// Index of the next free slot when `len < capacity`.
    write_idx: usize,
    /// One-way switch; never reset once raised.
    shutdown: bool,
}

/// Fixed-capacity FIFO queue with blocking async enqueue/dequeue and a
/// one-way shutdown switch.
///
/// The n-th successful enqueue is delivered by the n-th successful dequeue.
/// Which *consumer* receives a given item is unspecified.
pub struct BoundedQueue<T> {
    state: Mutex<State<T>>,
    /// Signalled when a slot frees up or on shutdown.
    not_full: Notify,
    /// Signalled when an item arrives or on shutdown.
    not_empty: Notify,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue with the given fixed capacity.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be non-zero");
        let slots = (0..capacity).map(|_| None).collect::<Vec<_>>();
        Self {
            state: Mutex::new(State {
                slots: slots.into_boxed_slice(),
                len: 0,
                read_idx: 0,
                write_idx: 0,
                shutdown: false,
            }),
            not_full: Notify::new(),
            not_empty: Notify::new(),
            capacity,
        }
    }

    /// Add an item to the tail of the queue, waiting while the queue is full.
    ///
    /// Fails immediately without blocking if the queue has been shut down,
    /// and fails on wakeup if shutdown is signalled while waiting. The
    /// rejected item is handed back inside the error in both cases.
    pub async fn enqueue(&self, item: T) -> Result<(), EnqueueError<T>> {
        loop {
            let notified = self.not_full.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let mut state = self.lock();
                if state.shutdown {
                    return Err(EnqueueError(item));
                }
                if state.len < self.capacity {
                    let idx = state.write_idx;
                    state.slots[idx] = Some(item);
                    state.write_idx = (idx + 1) % self.capacity;
                    state.len += 1;
                    drop(state);
                    self.not_empty.notify_one();
                    return Ok(());
                }
            }
            notified.await;
        }
    }

    /// Remove the item at the head of the queue, waiting while the queue is
    /// empty.
    ///
    /// After shutdown, already-stored items are still drained in FIFO order;
    /// `ShutdownError` is returned only when the queue is empty.
    pub async fn dequeue(&self) -> Result<T, ShutdownError> {
        loop {
            let notified = self.not_empty.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let mut state = self.lock();
                if state.len > 0 {
                    let idx = state.read_idx;
                    let item = state.slots[idx]
                        .take()
                        .expect("occupied slot at read index");
                    state.read_idx = (idx + 1) % self.capacity;
                    state.len -= 1;
                    drop(state);
                    self.not_full.notify_one();
                    return Ok(item);
                }
                if state.shutdown {
                    return Err(ShutdownError);
                }
            }
            notified.await;
        }
    }

    /// Raise the shutdown switch and wake every blocked producer and
    /// consumer. Idempotent; the switch is never lowered again.
    pub fn shutdown(&self) {
        {
            let mut state = self.lock();
            state.shutdown = true;
        }
        // Broadcast, not single-wake: every blocked task must re-check the
        // switch and exit rather than wait indefinitely.
        self.not_full.notify_waiters();
        self.not_empty.notify_waiters();
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.lock().len
    }

    /// Whether the queue currently holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed capacity this queue was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the shutdown switch has been raised.
    pub fn is_shut_down(&self) -> bool {
        self.lock().shutdown
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // A poisoned mutex means a task panicked mid-operation and the ring
        // state can no longer be trusted; abort instead of retrying.
        self.state.lock().expect("connection queue mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    const TICK: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn fifo_order_preserved() {
        let queue = BoundedQueue::new(8);
        for n in 0..8u32 {
            queue.enqueue(n).await.unwrap();
        }
        for n in 0..8u32 {
            assert_eq!(queue.dequeue().await.unwrap(), n);
        }
    }

    #[tokio::test]
    async fn fifo_survives_wraparound() {
        let queue = BoundedQueue::new(3);
        // Cycle enough times that read/write indices wrap several times.
        let mut next_in = 0u32;
        let mut next_out = 0u32;
        for _ in 0..5 {
            while queue.len() < queue.capacity() {
                queue.enqueue(next_in).await.unwrap();
                next_in += 1;
            }
            while !queue.is_empty() {
                assert_eq!(queue.dequeue().await.unwrap(), next_out);
                next_out += 1;
            }
        }
        assert_eq!(next_in, 15);
        assert_eq!(next_out, 15);
    }

    #[tokio::test]
    async fn length_never_exceeds_capacity() {
        let queue = Arc::new(BoundedQueue::new(4));
        let producer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                for n in 0..100u32 {
                    queue.enqueue(n).await.unwrap();
                }
            })
        };
        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                for _ in 0..100u32 {
                    queue.dequeue().await.unwrap();
                    assert!(queue.len() <= queue.capacity());
                }
            })
        };
        producer.await.unwrap();
        consumer.await.unwrap();
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn enqueue_after_shutdown_fails_without_blocking() {
        let queue: BoundedQueue<u32> = BoundedQueue::new(2);
        queue.shutdown();
        let err = timeout(TICK, queue.enqueue(7))
            .await
            .expect("enqueue must not block after shutdown")
            .unwrap_err();
        // Ownership of the rejected item stays with the caller.
        assert_eq!(err.into_inner(), 7);
    }

    #[tokio::test]
    async fn dequeue_after_shutdown_drains_then_stops() {
        let queue = BoundedQueue::new(4);
        queue.enqueue(1u32).await.unwrap();
        queue.enqueue(2u32).await.unwrap();
        queue.shutdown();
        // Drain-before-stop: stored items are still delivered in order.
        assert_eq!(queue.dequeue().await.unwrap(), 1);
        assert_eq!(queue.dequeue().await.unwrap(), 2);
        assert_eq!(queue.dequeue().await.unwrap_err(), ShutdownError);
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let queue: BoundedQueue<u32> = BoundedQueue::new(1);
        queue.shutdown();
        queue.shutdown();
        assert!(queue.is_shut_down());
        assert_eq!(queue.dequeue().await.unwrap_err(), ShutdownError);
    }

    #[tokio::test]
    async fn enqueue_blocks_until_slot_frees() {
        let queue = Arc::new(BoundedQueue::new(1));
        queue.enqueue(1u32).await.unwrap();

        let blocked = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.enqueue(2).await })
        };
        // The producer must still be parked while the queue is full.
        tokio::time::sleep(TICK).await;
        assert!(!blocked.is_finished());

        assert_eq!(queue.dequeue().await.unwrap(), 1);
        timeout(TICK, blocked)
            .await
            .expect("enqueue must unblock once a slot frees")
            .unwrap()
            .unwrap();
        assert_eq!(queue.dequeue().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn dequeue_blocks_until_item_arrives() {
        let queue: Arc<BoundedQueue<u32>> = Arc::new(BoundedQueue::new(1));
        let blocked = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.dequeue().await })
        };
        tokio::time::sleep(TICK).await;
        assert!(!blocked.is_finished());

        queue.enqueue(9).await.unwrap();
        let item = timeout(TICK, blocked)
            .await
            .expect("dequeue must unblock once an item arrives")
            .unwrap()
            .unwrap();
        assert_eq!(item, 9);
    }
}
