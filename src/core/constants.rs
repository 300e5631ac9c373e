//! Default tuning values for the buffered publisher.

use std::time::Duration;

/// Default capacity of the pending-message ring buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 10;

/// Default interval between reconnect attempts while disconnected.
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_millis(30_000);

/// Suggested capacity for the transport lifecycle event channel.
///
/// Transports are free to pick their own bound; this is the value used by
/// in-tree test doubles and examples.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;
