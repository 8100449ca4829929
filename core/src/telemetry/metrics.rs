use std::cell::Cell;

/// Per-run counters. A run is single-threaded, so plain cells suffice.
pub struct RunMetrics {
    bytes_fetched: Cell<usize>,
    received: Cell<usize>,
    accepted: Cell<usize>,
    rejected: Cell<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub bytes_fetched: usize,
    pub received: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            bytes_fetched: Cell::new(0),
            received: Cell::new(0),
            accepted: Cell::new(0),
            rejected: Cell::new(0),
        }
    }

    pub fn record_fetched(&self, bytes: usize) {
        self.bytes_fetched.set(self.bytes_fetched.get() + bytes);
    }

    pub fn record_decoded(&self, received: usize, accepted: usize, rejected: usize) {
        self.received.set(self.received.get() + received);
        self.accepted.set(self.accepted.get() + accepted);
        self.rejected.set(self.rejected.get() + rejected);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bytes_fetched: self.bytes_fetched.get(),
            received: self.received.get(),
            accepted: self.accepted.get(),
            rejected: self.rejected.get(),
        }
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
