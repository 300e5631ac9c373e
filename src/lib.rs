//! # Stanchion
//!
//! A resilient publish-side client for message-streaming transports.
//!
//! Stanchion decouples message producers from the liveness of the underlying
//! connection. Publishes land in a bounded, overflow-dropping ring buffer; a
//! single-flight background loop drains it in order whenever a connection is
//! available, and a fixed-interval supervisor re-establishes lost
//! connections automatically. It provides:
//!
//! - **Bounded memory**: at most `buffer_capacity` messages are held; on
//!   overflow the oldest is dropped through an injectable hook
//! - **Ordering**: FIFO delivery, with a failed message retried ahead of
//!   everything enqueued after it (at-least-once)
//! - **Self-healing**: a failed publish abandons the connection and
//!   reconnects; steady-state transport errors never surface to callers
//! - **Transport-agnostic**: any client exposing connect/publish/close with
//!   lifecycle notifications plugs in behind the [`Transport`] traits
//!
//! ## Modules
//!
//! - [`core`]: errors, constants, message types, and the transport contract
//! - [`buffer`]: the bounded ring buffer with drop-oldest overflow
//! - [`client`]: the public client, drain loop, and reconnect supervisor
//!
//! ## Example
//!
//! ```ignore
//! use stanchion::{Client, ClientConfig};
//!
//! let client = Client::builder()
//!     .buffer_capacity(64)
//!     .reconnect_interval(std::time::Duration::from_secs(10))
//!     .build(my_transport);
//!
//! client.connect("cluster", "publisher-1", Default::default()).await?;
//!
//! // Non-blocking; the returned length is a backpressure signal.
//! let pending = client.publish("orders.created", payload)?;
//!
//! // Wire into your own signal handling.
//! client.shutdown().await;
//! ```
//!
//! Logging goes through the [`tracing`] facade; install a subscriber in the
//! host application to see it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod client;
pub mod core;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::{BoundedQueue, OverflowHook};
    pub use crate::client::{Client, ClientBuilder, ClientConfig};
    pub use crate::core::{
        ConnectError, ConnectParams, Message, PublishError, Transport, TransportError,
        TransportEvent, TransportHandle,
    };
}

// Re-export commonly used items at crate root
pub use crate::buffer::BoundedQueue;
pub use crate::client::{Client, ClientBuilder, ClientConfig};
pub use crate::core::{
    ConnectError, ConnectParams, Message, PublishError, Transport, TransportError,
    TransportEvent, TransportHandle,
};
