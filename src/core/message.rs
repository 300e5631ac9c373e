//! Message and connection parameter types.

use std::collections::HashMap;

/// A pending publish: an opaque subject/payload pair.
///
/// Messages are immutable once created. They are consumed on successful
/// publish, and re-queued (not copied) at the head of the buffer when a
/// publish attempt fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Destination subject. Pass-through; the core never interprets it.
    pub subject: String,
    /// Message payload. Pass-through; the core never interprets it.
    pub payload: Vec<u8>,
}

impl Message {
    /// Create a new message.
    pub fn new(subject: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
        }
    }
}

/// Connection parameters, captured on `connect` and reused verbatim by
/// every reconnect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Cluster identifier understood by the transport.
    pub cluster_id: String,
    /// Client identifier understood by the transport.
    pub client_id: String,
    /// Opaque transport options, passed through untouched.
    pub options: HashMap<String, String>,
}

impl ConnectParams {
    /// Create connection parameters with no extra options.
    pub fn new(cluster_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            client_id: client_id.into(),
            options: HashMap::new(),
        }
    }
}
