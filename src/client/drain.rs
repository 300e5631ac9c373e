//! Background drain loop.
//!
//! Dequeues and publishes one message at a time while a transport handle is
//! available. Single-flight: the `draining` flag guarantees at most one loop
//! instance, no matter how many publishes or reconnects try to start it.
//! The loop stops (and clears the flag) when the queue empties or the handle
//! disappears; the next publish or successful reconnect re-arms it.

use std::sync::Arc;

use tracing::{debug, warn};

use super::state::{self, Shared};
use super::supervisor;

/// Start the drain loop unless one is already in flight or there is no
/// transport handle to publish on.
pub(crate) fn spawn_if_idle(shared: &Arc<Shared>) {
    {
        let mut inner = shared.inner.lock();
        if inner.draining || inner.handle.is_none() {
            return;
        }
        inner.draining = true;
    }
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        run(&shared).await;
    });
}

async fn run(shared: &Arc<Shared>) {
    loop {
        // Take the next message and the current handle under the lock,
        // publish outside it.
        let (message, handle) = {
            let mut inner = shared.inner.lock();
            let Some(handle) = inner.handle.clone() else {
                inner.draining = false;
                debug!("drain loop stopping: no transport handle");
                return;
            };
            match inner.queue.dequeue() {
                Some(message) => (message, handle),
                None => {
                    // Queue empty: sleep until the next publish or
                    // reconnect wakes the loop again.
                    inner.draining = false;
                    return;
                }
            }
        };

        match handle.publish(&message.subject, &message.payload).await {
            Ok(()) => {
                // A successful publish proves liveness even if the
                // connected event has not landed yet.
                state::set_connected(shared, true);
            }
            Err(err) => {
                warn!(
                    subject = %message.subject,
                    error = %err,
                    "publish failed, re-queueing message and reconnecting"
                );
                {
                    let mut inner = shared.inner.lock();
                    inner.queue.requeue_front(message);
                    inner.draining = false;
                }
                // The new connection's connected handling restarts the loop.
                supervisor::force_reconnect(shared);
                return;
            }
        }
    }
}
