//! Reconnect supervisor.
//!
//! A two-state machine: IDLE while connected (no task), ARMED while
//! disconnected (a spawned task ticking at a fixed interval). Each tick
//! fires one reconnect attempt with the stored connection parameters.
//! There is no backoff; the interval is fixed by configuration.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tracing::{debug, warn};

use super::client;
use super::state::{Inner, Shared};

/// Arm the supervisor if it is not already running.
///
/// Called with the state lock held. The task only holds a weak reference
/// so a dropped client does not keep ticking forever.
pub(crate) fn arm(shared: &Arc<Shared>, inner: &mut Inner) {
    if inner.reconnect.is_some() {
        return;
    }
    let interval = shared.config.reconnect_interval;
    let weak = Arc::downgrade(shared);
    debug!(interval_ms = interval.as_millis() as u64, "arming reconnect supervisor");
    inner.reconnect = Some(tokio::spawn(tick_loop(weak, interval)));
}

/// Disarm the supervisor, aborting any pending tick.
pub(crate) fn disarm(inner: &mut Inner) {
    if let Some(task) = inner.reconnect.take() {
        debug!("disarming reconnect supervisor");
        task.abort();
    }
}

async fn tick_loop(weak: Weak<Shared>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;
        let Some(shared) = weak.upgrade() else {
            return;
        };
        debug!("reconnect tick");
        spawn_attempt(&shared);
    }
}

/// Mark the connection dead and kick off an immediate reconnect attempt.
///
/// Used by the drain loop after a failed publish: the current handle is
/// abandoned and a fresh connection started right away, with the armed
/// supervisor as the fallback if that attempt fails too.
pub(crate) fn force_reconnect(shared: &Arc<Shared>) {
    {
        let mut inner = shared.inner.lock();
        inner.connected = false;
        arm(shared, &mut inner);
    }
    spawn_attempt(shared);
}

/// Fire-and-forget reconnect with the stored parameters.
///
/// No-op until a `connect` call has stored parameters to replay.
pub(crate) fn spawn_attempt(shared: &Arc<Shared>) {
    let params = shared.inner.lock().params.clone();
    let Some(params) = params else {
        return;
    };
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        match client::connect_inner(&shared, params).await {
            Ok(true) => {}
            Ok(false) => debug!("reconnect attempt did not establish a connection"),
            Err(err) => warn!(error = %err, "reconnect attempt failed"),
        }
    });
}
