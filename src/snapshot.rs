// Last-published bandwidth figures, shared between the driver and readers.

use crate::models::BandwidthSnapshot;
use std::sync::Mutex;

/// Holds the most recent `BandwidthSnapshot`. The pair is replaced
/// wholesale under one lock acquisition, so a reader can never observe
/// upload from one cycle and download from another. Starts at the zero
/// default until the first publish.
#[derive(Debug, Default)]
pub struct SpeedStore {
    current: Mutex<BandwidthSnapshot>,
}

impl SpeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: BandwidthSnapshot) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = snapshot;
        }
    }

    /// Copy of the current pair. Never blocks longer than the store's own
    /// whole-value swap.
    pub fn read(&self) -> BandwidthSnapshot {
        self.current.lock().map(|guard| *guard).unwrap_or_default()
    }
}
