//! Core types: errors, constants, messages, and the transport contract.
//!
//! Everything in this module is transport-agnostic. The [`Transport`] and
//! [`TransportHandle`] traits define the only capability the client requires
//! from the underlying streaming library; [`TransportEvent`] carries its
//! lifecycle notifications back into the client.

pub mod constants;
mod error;
mod message;
mod traits;

pub use error::{ConnectError, PublishError, TransportError};
pub use message::{ConnectParams, Message};
pub use traits::{Transport, TransportEvent, TransportHandle};
