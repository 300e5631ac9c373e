//! Shared client state.
//!
//! All mutable state lives in one [`Inner`] struct behind a single mutex.
//! The lock is synchronous and never held across an await; transport calls
//! clone the handle out first.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::buffer::BoundedQueue;
use crate::core::{ConnectParams, Transport, TransportHandle};

use super::client::ClientConfig;
use super::supervisor;

/// State shared between the public client and its background tasks.
pub(crate) struct Shared {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) config: ClientConfig,
    pub(crate) inner: Mutex<Inner>,
}

/// The single mutable state record.
pub(crate) struct Inner {
    /// Pending messages awaiting drain.
    pub(crate) queue: BoundedQueue,
    /// Current liveness flag. Transitions arm/disarm the supervisor.
    pub(crate) connected: bool,
    /// Monotonic: true once any connection has succeeded.
    pub(crate) ever_connected: bool,
    /// Single-flight guard for the drain loop.
    pub(crate) draining: bool,
    /// Current transport connection, replaced on every (re)connect.
    pub(crate) handle: Option<Arc<dyn TransportHandle>>,
    /// Parameters captured on connect, reused by every reconnect.
    pub(crate) params: Option<ConnectParams>,
    /// Reconnect supervisor task while armed.
    pub(crate) reconnect: Option<JoinHandle<()>>,
    /// Bumped on every connect attempt; event pumps from replaced
    /// connections compare against it and stand down.
    pub(crate) epoch: u64,
}

impl Inner {
    pub(crate) fn new(queue: BoundedQueue) -> Self {
        Self {
            queue,
            connected: false,
            ever_connected: false,
            draining: false,
            handle: None,
            params: None,
            reconnect: None,
            epoch: 0,
        }
    }
}

/// Flip the liveness flag, edge-triggered.
///
/// A flip to disconnected arms the reconnect supervisor; a flip to connected
/// disarms it. Redundant writes are ignored so they cannot churn the timer.
pub(crate) fn set_connected(shared: &Arc<Shared>, connected: bool) {
    let mut inner = shared.inner.lock();
    if inner.connected == connected {
        return;
    }
    inner.connected = connected;
    if connected {
        supervisor::disarm(&mut inner);
    } else {
        supervisor::arm(shared, &mut inner);
    }
}
