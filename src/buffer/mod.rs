//! Bounded ring buffer for pending messages.
//!
//! The buffer is the only place a message lives between being accepted by
//! [`Client::publish`](crate::client::Client::publish) and being handed to
//! the transport. It is fixed-capacity: when full, a new enqueue evicts the
//! oldest entry and reports it to an injectable overflow hook. Access is
//! serialized by the client's single state lock; the buffer itself carries
//! no synchronization.

use std::collections::VecDeque;

use tracing::warn;

use crate::core::Message;

/// Strategy invoked with each message evicted on overflow.
///
/// The default hook logs one warning per dropped message. Hosts that want
/// dead-letter handling, metrics, or silence inject their own.
pub type OverflowHook = Box<dyn FnMut(Message) + Send>;

/// Fixed-capacity FIFO queue of pending messages with drop-oldest overflow.
pub struct BoundedQueue {
    items: VecDeque<Message>,
    capacity: usize,
    on_overflow: OverflowHook,
}

impl BoundedQueue {
    /// Create a queue with the given capacity and the default logging
    /// overflow hook. A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        Self::with_hook(
            capacity,
            Box::new(|message: Message| {
                warn!(
                    subject = %message.subject,
                    bytes = message.payload.len(),
                    "buffer full, dropping oldest message"
                );
            }),
        )
    }

    /// Create a queue with the given capacity and overflow hook.
    pub fn with_hook(capacity: usize, on_overflow: OverflowHook) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            on_overflow,
        }
    }

    /// Append a message at the tail, returning the new length.
    ///
    /// If the queue is already at capacity the head element is evicted and
    /// the overflow hook invoked with it before the new message is appended.
    pub fn enqueue(&mut self, message: Message) -> usize {
        if self.items.len() >= self.capacity {
            if let Some(evicted) = self.items.pop_front() {
                (self.on_overflow)(evicted);
            }
        }
        self.items.push_back(message);
        self.items.len()
    }

    /// Re-insert a message at the head after a failed publish.
    ///
    /// Unconditional: the message was just dequeued, so overall load is
    /// conserved and the overflow hook is never invoked. If an enqueue
    /// raced in behind the dequeue the length may transiently reach
    /// capacity + 1; the excess resolves on the next dequeue.
    pub fn requeue_front(&mut self, message: Message) {
        self.items.push_front(message);
    }

    /// Remove and return the head message, or `None` if empty.
    pub fn dequeue(&mut self) -> Option<Message> {
        self.items.pop_front()
    }

    /// Number of messages currently buffered.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no messages.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Debug for BoundedQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;

    fn msg(subject: &str) -> Message {
        Message::new(subject, subject.as_bytes())
    }

    /// Queue that records evicted subjects instead of logging them.
    fn recording_queue(capacity: usize) -> (BoundedQueue, Arc<Mutex<Vec<String>>>) {
        let dropped = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&dropped);
        let queue = BoundedQueue::with_hook(
            capacity,
            Box::new(move |message| sink.lock().unwrap().push(message.subject)),
        );
        (queue, dropped)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = BoundedQueue::new(4);

        assert_eq!(queue.enqueue(msg("a")), 1);
        assert_eq!(queue.enqueue(msg("b")), 2);
        assert_eq!(queue.enqueue(msg("c")), 3);

        assert_eq!(queue.dequeue().unwrap().subject, "a");
        assert_eq!(queue.dequeue().unwrap().subject, "b");
        assert_eq!(queue.dequeue().unwrap().subject, "c");
        assert!(queue.dequeue().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_overflow_evicts_oldest_and_fires_hook_once() {
        let (mut queue, dropped) = recording_queue(2);

        queue.enqueue(msg("a"));
        queue.enqueue(msg("b"));
        assert_eq!(queue.enqueue(msg("c")), 2);

        assert_eq!(*dropped.lock().unwrap(), vec!["a".to_string()]);
        assert_eq!(queue.dequeue().unwrap().subject, "b");
        assert_eq!(queue.dequeue().unwrap().subject, "c");
    }

    #[test]
    fn test_length_never_exceeds_capacity_on_enqueue() {
        let (mut queue, dropped) = recording_queue(3);

        for i in 0..10 {
            let len = queue.enqueue(msg(&format!("m{i}")));
            assert!(len <= 3);
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(dropped.lock().unwrap().len(), 7);
    }

    #[test]
    fn test_requeue_front_retries_before_newer_messages() {
        let mut queue = BoundedQueue::new(4);

        queue.enqueue(msg("a"));
        queue.enqueue(msg("b"));

        // Simulate a failed publish of the head.
        let failed = queue.dequeue().unwrap();
        queue.requeue_front(failed);

        assert_eq!(queue.dequeue().unwrap().subject, "a");
        assert_eq!(queue.dequeue().unwrap().subject, "b");
    }

    #[test]
    fn test_requeue_front_on_full_queue_skips_hook() {
        let (mut queue, dropped) = recording_queue(2);

        queue.enqueue(msg("a"));
        queue.enqueue(msg("b"));

        // A full queue may transiently hold capacity + 1 after a re-queue;
        // the hook stays silent because no new load was added.
        queue.requeue_front(msg("retry"));

        assert_eq!(queue.len(), 3);
        assert!(dropped.lock().unwrap().is_empty());
        assert_eq!(queue.dequeue().unwrap().subject, "retry");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let queue = BoundedQueue::new(0);
        assert_eq!(queue.capacity(), 1);
    }
}
