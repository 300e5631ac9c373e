//! The transport contract.
//!
//! The core is transport-agnostic: anything that can connect, publish, and
//! close while emitting lifecycle notifications can sit underneath the
//! client. Implementations wrap a concrete streaming client (NATS Streaming,
//! MQTT, an in-process broker) behind these two traits.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::TransportError;
use super::message::ConnectParams;

/// Lifecycle notifications emitted by a transport connection.
///
/// Only [`Connected`](TransportEvent::Connected) and
/// [`Error`](TransportEvent::Error) drive the connect handshake; the rest
/// are informational, except that `Disconnected`/`Closed` flip the client
/// into its reconnecting state.
#[derive(Debug)]
pub enum TransportEvent {
    /// The connection is established and ready to publish.
    Connected,
    /// The transport is attempting to re-establish its own connection.
    Reconnecting,
    /// The transport re-established its own connection.
    Reconnected,
    /// The connection was lost.
    Disconnected,
    /// The connection was closed for good.
    Closed,
    /// The transport reported an error.
    Error(TransportError),
    /// The transport denied an operation on the named subject.
    PermissionError(String),
}

/// Factory side of the transport contract.
///
/// `connect` initiates a connection attempt and returns the handle together
/// with the receiving end of its lifecycle event stream. The handle is
/// usable for publishing only after the stream has delivered
/// [`TransportEvent::Connected`].
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Initiate a connection with the given parameters.
    ///
    /// An `Err` here means the attempt could not even be started (bad
    /// address, refused socket). Failures after initiation are delivered
    /// as [`TransportEvent::Error`] on the returned stream.
    async fn connect(
        &self,
        params: &ConnectParams,
    ) -> Result<(Arc<dyn TransportHandle>, mpsc::Receiver<TransportEvent>), TransportError>;
}

/// A live (or pending) transport connection.
#[async_trait]
pub trait TransportHandle: Send + Sync + 'static {
    /// Publish one message. Resolves when the transport has accepted or
    /// rejected it.
    async fn publish(&self, subject: &str, payload: &[u8]) -> Result<(), TransportError>;

    /// Close the connection. Must only be called on a connection that is
    /// actually open; closing twice is a contract violation.
    async fn close(&self) -> Result<(), TransportError>;
}
