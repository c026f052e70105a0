//! Cumulative outbound traffic counters.
//!
//! Only the writer task increments these; status reporters read them
//! concurrently. Relaxed atomics are enough for that single-writer,
//! best-effort-read arrangement.

use std::sync::atomic::{AtomicU64, Ordering};

/// Frames and bytes written since the connection was established.
#[derive(Debug, Default)]
pub struct WriteMetrics {
    frames_written: AtomicU64,
    bytes_written: AtomicU64,
}

impl WriteMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully written frame of `bytes` encoded bytes
    /// (excluding the trailing NUL terminator).
    pub fn record_frame(&self, bytes: u64) {
        self.frames_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Total frames written.
    pub fn frames_written(&self) -> u64 {
        self.frames_written.load(Ordering::Relaxed)
    }

    /// Total encoded bytes written, excluding frame terminators.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = WriteMetrics::new();
        assert_eq!(metrics.frames_written(), 0);
        assert_eq!(metrics.bytes_written(), 0);
    }

    #[test]
    fn test_record_frame_accumulates() {
        let metrics = WriteMetrics::new();
        metrics.record_frame(100);
        metrics.record_frame(24);
        assert_eq!(metrics.frames_written(), 2);
        assert_eq!(metrics.bytes_written(), 124);
    }
}
