//! Buffered publisher client.
//!
//! The public [`Client`] is the publish gateway and lifecycle entry point.
//! Behind it sit three cooperating pieces, all serialized through one state
//! lock:
//!
//! - the **drain loop**: single-flight background task that publishes the
//!   head of the buffer while a connection is available;
//! - the **reconnect supervisor**: fixed-interval timer, armed while
//!   disconnected, that replays the stored connection parameters;
//! - the **event pump**: consumer of the transport's lifecycle
//!   notifications for the current connection.

#[allow(clippy::module_inception)]
mod client;
mod drain;
mod state;
mod supervisor;

pub use client::{Client, ClientBuilder, ClientConfig};
