//! Last-send tracking for heartbeat monitoring.
//!
//! The writer task records the instant of every successful send; the
//! external heartbeat monitor reads it to decide whether the connection
//! still needs a liveness probe. The timestamp is the only state shared
//! between those two tasks, so it sits behind its own mutex held just
//! long enough to copy the instant.

use std::sync::Mutex;
use std::time::Instant;

/// Timestamp of the last successful send, shared between the writer
/// task and the heartbeat monitor.
#[derive(Debug, Default)]
pub struct HeartbeatTracker {
    last_send: Mutex<Option<Instant>>,
}

impl HeartbeatTracker {
    /// Create a tracker with no sends recorded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful send at the current instant.
    pub fn record_send(&self) {
        let mut guard = self
            .last_send
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(Instant::now());
    }

    /// Instant of the latest successful send, or `None` if nothing has
    /// been sent on this connection.
    pub fn last_send(&self) -> Option<Instant> {
        *self
            .last_send
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
