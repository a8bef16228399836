use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError, TrySendError};
use std::time::Duration;

/// Bounded single-producer/single-consumer FIFO built on `sync_channel`.
#[derive(Debug)]
pub struct FrameQueue;

impl FrameQueue {
    /// Create a queue holding at most `capacity` items (minimum 1).
    pub fn bounded<T>(capacity: usize) -> (FrameProducer<T>, FrameConsumer<T>) {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::sync_channel(capacity);
        let depth = Arc::new(AtomicUsize::new(0));
        (
            FrameProducer {
                tx,
                depth: depth.clone(),
                capacity,
            },
            FrameConsumer { rx, depth },
        )
    }
}

/// Why a non-blocking push did not enqueue.
#[derive(Debug, PartialEq, Eq)]
pub enum PushError<T> {
    /// The queue is at capacity; the item is handed back.
    Full(T),
    /// The consumer is gone; the item is handed back.
    Disconnected(T),
}

/// Sending half of a [`FrameQueue`].
#[derive(Debug)]
pub struct FrameProducer<T> {
    tx: SyncSender<T>,
    depth: Arc<AtomicUsize>,
    capacity: usize,
}

impl<T> FrameProducer<T> {
    /// Whether the queue currently holds `capacity` items.
    pub fn is_full(&self) -> bool {
        self.depth.load(Ordering::Acquire) >= self.capacity
    }

    /// Enqueue without blocking.
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        self.depth.fetch_add(1, Ordering::AcqRel);
        match self.tx.try_send(item) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.depth.fetch_sub(1, Ordering::AcqRel);
                Err(match e {
                    TrySendError::Full(t) => PushError::Full(t),
                    TrySendError::Disconnected(t) => PushError::Disconnected(t),
                })
            }
        }
    }

    /// Enqueue, blocking while full. Returns the item if the consumer is gone.
    pub fn push(&self, item: T) -> Result<(), T> {
        self.depth.fetch_add(1, Ordering::AcqRel);
        self.tx.send(item).map_err(|e| {
            self.depth.fetch_sub(1, Ordering::AcqRel);
            e.0
        })
    }

    /// Maximum number of queued items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Receiving half of a [`FrameQueue`].
#[derive(Debug)]
pub struct FrameConsumer<T> {
    rx: Receiver<T>,
    depth: Arc<AtomicUsize>,
}

impl<T> FrameConsumer<T> {
    fn took(&self, item: T) -> T {
        self.depth.fetch_sub(1, Ordering::AcqRel);
        item
    }

    /// Dequeue without blocking.
    pub fn try_pop(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(item) => Some(self.took(item)),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Dequeue, blocking until an item arrives. `None` once the producer is gone and drained.
    pub fn pop(&self) -> Option<T> {
        self.rx.recv().ok().map(|item| self.took(item))
    }

    /// Dequeue, waiting at most `timeout`.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(item) => Some(self.took(item)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Items currently queued.
    pub fn len(&self) -> usize {
        self.depth.load(Ordering::Acquire)
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/queue.rs"]
mod tests;
