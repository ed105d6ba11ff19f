//! Lock-Free Message Queue
//!
//! SPSC ring buffer between the network intake thread (producer) and the
//! dispatch loop (consumer), built on `rtrb`. The producer never blocks; when
//! the queue is full the newest message is dropped and counted. The consumer
//! drains in FIFO order, so per-address ordering is preserved end to end.

use super::message::Message;
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default queue capacity (must be a power of 2)
pub const DEFAULT_CAPACITY: usize = 1024;

/// Queue statistics for monitoring
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Messages accepted by the producer
    pub received: AtomicU64,
    /// Messages dropped because the queue was full
    pub dropped: AtomicU64,
    /// Messages handed to the dispatch loop
    pub dispatched: AtomicU64,
}

/// SPSC queue connecting intake to dispatch.
pub struct MessageQueue {
    producer: Producer<Message>,
    consumer: Consumer<Message>,
    stats: Arc<QueueStats>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a queue with the given capacity.
    ///
    /// # Panics
    /// Panics if capacity is not a power of 2. Configuration validation
    /// rejects such values before this is reached.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "Queue capacity must be a power of 2"
        );
        let (producer, consumer) = RingBuffer::new(capacity);
        Self {
            producer,
            consumer,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Split into the producer half (intake thread) and consumer half
    /// (dispatch loop).
    pub fn split(self) -> (MessageProducer, MessageConsumer) {
        (
            MessageProducer {
                inner: self.producer,
                stats: Arc::clone(&self.stats),
            },
            MessageConsumer {
                inner: self.consumer,
                stats: self.stats,
            },
        )
    }

    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half (network intake thread).
pub struct MessageProducer {
    inner: Producer<Message>,
    stats: Arc<QueueStats>,
}

impl MessageProducer {
    /// Push a message without blocking.
    ///
    /// Returns false if the queue was full and the message was dropped.
    #[inline]
    pub fn push(&mut self, message: Message) -> bool {
        match self.inner.push(message) {
            Ok(()) => {
                self.stats.received.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(_) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }
}

/// Consumer half (dispatch loop).
pub struct MessageConsumer {
    inner: Consumer<Message>,
    stats: Arc<QueueStats>,
}

impl MessageConsumer {
    /// Pop the next message, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<Message> {
        match self.inner.pop() {
            Ok(message) => {
                self.stats.dispatched.fetch_add(1, Ordering::Relaxed);
                Some(message)
            }
            Err(_) => None,
        }
    }

    /// Drain up to `max_count` messages in FIFO order.
    pub fn pop_batch(&mut self, max_count: usize) -> Vec<Message> {
        let mut batch = Vec::with_capacity(max_count.min(self.inner.slots()));
        for _ in 0..max_count {
            match self.pop() {
                Some(message) => batch.push(message),
                None => break,
            }
        }
        batch
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.inner.slots()
    }
}
