//! High-level buffered publisher client.
//!
//! Provides [`Client`]: the publish gateway plus the connect/disconnect
//! lifecycle. Publishes are accepted into the bounded buffer regardless of
//! connectivity (subject to policy) and drained in order by a background
//! loop; lost connections are re-established automatically.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::buffer::{BoundedQueue, OverflowHook};
use crate::core::constants::{DEFAULT_BUFFER_CAPACITY, DEFAULT_RECONNECT_INTERVAL};
use crate::core::{
    ConnectError, ConnectParams, Message, PublishError, Transport, TransportEvent,
};

use super::drain;
use super::state::{self, Inner, Shared};
use super::supervisor;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Capacity of the pending-message buffer (oldest dropped on overflow).
    pub buffer_capacity: usize,

    /// Interval between reconnect attempts while disconnected.
    pub reconnect_interval: Duration,

    /// When true, `publish` is rejected with
    /// [`PublishError::NotConnectedYet`] until the first successful
    /// connection. When false (default), pre-connection publishes are
    /// buffered and drained once connected.
    pub require_initial_connection: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            require_initial_connection: false,
        }
    }
}

/// Builder for creating a [`Client`].
pub struct ClientBuilder {
    config: ClientConfig,
    on_overflow: Option<OverflowHook>,
}

impl ClientBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            on_overflow: None,
        }
    }

    /// Set the pending-message buffer capacity.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    /// Set the reconnect interval.
    pub fn reconnect_interval(mut self, interval: Duration) -> Self {
        self.config.reconnect_interval = interval;
        self
    }

    /// Require a first successful connection before accepting publishes.
    pub fn require_initial_connection(mut self, required: bool) -> Self {
        self.config.require_initial_connection = required;
        self
    }

    /// Install an overflow hook, invoked with each message dropped when the
    /// buffer is full. Replaces the default logging hook.
    pub fn on_overflow(mut self, hook: impl FnMut(Message) + Send + 'static) -> Self {
        self.on_overflow = Some(Box::new(hook));
        self
    }

    /// Build the client on top of the given transport.
    pub fn build(self, transport: impl Transport) -> Client {
        let queue = match self.on_overflow {
            Some(hook) => BoundedQueue::with_hook(self.config.buffer_capacity, hook),
            None => BoundedQueue::new(self.config.buffer_capacity),
        };
        Client::from_parts(Arc::new(transport), self.config, queue)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A resilient buffered publisher.
///
/// Cheap to clone; all clones share the same buffer and connection.
///
/// # Example
///
/// ```ignore
/// use stanchion::{Client, ClientConfig};
///
/// let client = Client::new(my_transport, ClientConfig::default());
/// client.connect("cluster", "publisher-1", Default::default()).await?;
///
/// // Fire-and-forget: returns the queue length as a backpressure signal.
/// let pending = client.publish("orders.created", b"{\"id\":42}".to_vec())?;
///
/// client.shutdown().await;
/// ```
#[derive(Clone)]
pub struct Client {
    shared: Arc<Shared>,
}

impl Client {
    /// Create a client with the default overflow hook.
    pub fn new(transport: impl Transport, config: ClientConfig) -> Self {
        let queue = BoundedQueue::new(config.buffer_capacity);
        Self::from_parts(Arc::new(transport), config, queue)
    }

    /// Create a client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    fn from_parts(transport: Arc<dyn Transport>, config: ClientConfig, queue: BoundedQueue) -> Self {
        Self {
            shared: Arc::new(Shared {
                transport,
                config,
                inner: Mutex::new(Inner::new(queue)),
            }),
        }
    }

    /// Connect to the transport.
    ///
    /// Tears down any prior connection, stores the parameters for later
    /// reconnects, and resolves once the transport reports its first
    /// lifecycle event. Returns `Ok(true)` once connected. Fails only if
    /// the transport reports an error before any connection has ever
    /// succeeded; after that, failures are absorbed (`Ok(false)`) and the
    /// reconnect supervisor takes over recovery.
    pub async fn connect(
        &self,
        cluster_id: impl Into<String>,
        client_id: impl Into<String>,
        options: HashMap<String, String>,
    ) -> Result<bool, ConnectError> {
        let params = ConnectParams {
            cluster_id: cluster_id.into(),
            client_id: client_id.into(),
            options,
        };
        connect_inner(&self.shared, params).await
    }

    /// Queue a message for publishing, returning the new queue length.
    ///
    /// Non-suspending: the message is buffered and published in the
    /// background, in FIFO order. Once accepted, delivery is fire-and-forget
    /// (at-least-once; a failed attempt is retried ahead of newer messages
    /// after reconnecting). The returned length is the caller's
    /// backpressure signal.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime; the drain loop is spawned
    /// onto the ambient runtime.
    pub fn publish(
        &self,
        subject: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<usize, PublishError> {
        let length = {
            let mut inner = self.shared.inner.lock();
            if self.shared.config.require_initial_connection && !inner.ever_connected {
                return Err(PublishError::NotConnectedYet);
            }
            inner.queue.enqueue(Message::new(subject, payload))
        };
        drain::spawn_if_idle(&self.shared);
        Ok(length)
    }

    /// Current liveness flag.
    pub fn connected(&self) -> bool {
        self.shared.inner.lock().connected
    }

    /// Number of messages currently buffered.
    pub fn pending(&self) -> usize {
        self.shared.inner.lock().queue.len()
    }

    /// Disconnect from the transport. Never fails.
    ///
    /// Disarms the reconnect supervisor and closes the connection if one is
    /// open; a no-op otherwise (an unopened or already-closed transport is
    /// never closed).
    pub async fn disconnect(&self) {
        let handle = {
            let mut inner = self.shared.inner.lock();
            supervisor::disarm(&mut inner);
            if inner.connected {
                inner.connected = false;
                inner.handle.take()
            } else {
                None
            }
        };
        if let Some(handle) = handle {
            if let Err(err) = handle.close().await {
                debug!(error = %err, "transport close reported an error");
            }
        }
    }

    /// Shut the client down: cancel timers and disconnect best-effort.
    ///
    /// The core registers no process-global handlers; hosts wire this into
    /// their own signal handling.
    pub async fn shutdown(&self) {
        debug!("shutting down");
        self.disconnect().await;
    }
}

/// Connect (or reconnect) with the given parameters.
///
/// Shared by the public `connect`, the reconnect supervisor's ticks, and
/// the drain loop's forced reconnects.
pub(crate) async fn connect_inner(
    shared: &Arc<Shared>,
    params: ConnectParams,
) -> Result<bool, ConnectError> {
    // Tear down any prior connection. Only a live connection is closed;
    // an abandoned handle is just dropped.
    let (prior, epoch) = {
        let mut inner = shared.inner.lock();
        let was_connected = inner.connected;
        inner.connected = false;
        if was_connected {
            supervisor::arm(shared, &mut inner);
        }
        let prior = if was_connected { inner.handle.take() } else { None };
        inner.handle = None;
        inner.params = Some(params.clone());
        inner.epoch += 1;
        (prior, inner.epoch)
    };
    if let Some(handle) = prior {
        if let Err(err) = handle.close().await {
            debug!(error = %err, "close of prior connection reported an error");
        }
    }

    let ever_connected = shared.inner.lock().ever_connected;

    let (handle, mut events) = match shared.transport.connect(&params).await {
        Ok(pair) => pair,
        Err(err) => {
            if ever_connected {
                warn!(error = %err, "transport connect failed; supervisor will retry");
                return Ok(false);
            }
            return Err(ConnectError::Transport(err));
        }
    };

    {
        let mut inner = shared.inner.lock();
        if inner.epoch != epoch {
            debug!("connect attempt superseded by a newer one");
            return Ok(false);
        }
        inner.handle = Some(Arc::clone(&handle));
    }

    // Wait for the first decisive lifecycle event.
    loop {
        match events.recv().await {
            Some(TransportEvent::Connected) => {
                {
                    let mut inner = shared.inner.lock();
                    if inner.epoch != epoch {
                        return Ok(false);
                    }
                    inner.ever_connected = true;
                }
                state::set_connected(shared, true);
                info!(
                    cluster_id = %params.cluster_id,
                    client_id = %params.client_id,
                    "connected"
                );
                drain::spawn_if_idle(shared);
                tokio::spawn(event_pump(Arc::clone(shared), events, epoch));
                return Ok(true);
            }
            Some(TransportEvent::Error(err)) => {
                if ever_connected {
                    warn!(error = %err, "transport error during reconnect; supervisor will retry");
                    return Ok(false);
                }
                return Err(ConnectError::Transport(err));
            }
            Some(event) => {
                debug!(?event, "lifecycle event before connection established");
            }
            None => {
                if ever_connected {
                    return Ok(false);
                }
                return Err(ConnectError::EventStreamClosed);
            }
        }
    }
}

/// Consume post-connect lifecycle events for one connection epoch.
///
/// Errors after the first successful connection are absorbed here; loss of
/// the connection flips the liveness flag, which arms the supervisor.
async fn event_pump(shared: Arc<Shared>, mut events: mpsc::Receiver<TransportEvent>, epoch: u64) {
    while let Some(event) = events.recv().await {
        if shared.inner.lock().epoch != epoch {
            debug!(?event, "dropping event from a replaced connection");
            return;
        }
        match event {
            TransportEvent::Disconnected | TransportEvent::Closed => {
                info!("transport reported disconnect");
                state::set_connected(&shared, false);
            }
            TransportEvent::Error(err) => {
                warn!(error = %err, "transport error; recovery delegated to the reconnect supervisor");
            }
            TransportEvent::PermissionError(subject) => {
                warn!(subject = %subject, "transport denied permission");
            }
            TransportEvent::Reconnecting => debug!("transport reconnecting"),
            TransportEvent::Reconnected => debug!("transport reconnected"),
            TransportEvent::Connected => debug!("redundant connected event"),
        }
    }
}
