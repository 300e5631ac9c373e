//! Error types for the buffered publisher.

use thiserror::Error;

/// Errors reported by the transport collaborator.
///
/// These originate outside the core: the transport owns the wire protocol
/// and surfaces its failures through this type, both as return values and
/// wrapped in [`TransportEvent::Error`](super::TransportEvent::Error).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport could not establish a connection.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A publish attempt was rejected or lost by the transport.
    #[error("publish failed: {0}")]
    PublishFailed(String),

    /// The connection was closed underneath an operation.
    #[error("connection closed")]
    ConnectionClosed,

    /// The transport denied an operation for authorization reasons.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by [`Client::connect`](crate::client::Client::connect).
///
/// Only failures before the first successful connection are surfaced here.
/// Once a client has connected at least once, transport errors are absorbed
/// and recovery is delegated to the reconnect supervisor.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The transport reported an error before any successful connection.
    #[error("transport error before initial connection: {0}")]
    Transport(#[from] TransportError),

    /// The transport closed its event stream without reporting a connection.
    #[error("transport closed its event stream before reporting a connection")]
    EventStreamClosed,
}

/// Errors returned by [`Client::publish`](crate::client::Client::publish).
#[derive(Debug, Error)]
pub enum PublishError {
    /// The client is configured to require an initial connection and none
    /// has been established yet. The message was not queued.
    #[error("client has not yet established its initial connection")]
    NotConnectedYet,
}
