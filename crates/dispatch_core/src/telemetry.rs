//! Telemetry / KPIs: records completed bookings for analysis.

use std::sync::Mutex;
use std::time::Instant;

/// One completed booking, recorded when the driver reaches the destination.
/// Timestamps are millisecond offsets from dispatch start; use the helper
/// methods for derived KPIs.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompletedBookingRecord {
    pub booking_id: u64,
    pub passenger_name: String,
    pub driver_name: String,
    pub region_name: String,
    pub requested_at_ms: u64,
    pub driver_acquired_at_ms: u64,
    pub picked_up_at_ms: u64,
    pub completed_at_ms: u64,
}

impl CompletedBookingRecord {
    /// Time from task start to a driver being acquired from the pool.
    pub fn wait_for_driver(&self) -> u64 {
        self.driver_acquired_at_ms.saturating_sub(self.requested_at_ms)
    }

    /// Time the driver spent collecting the passenger.
    pub fn pickup_duration(&self) -> u64 {
        self.picked_up_at_ms.saturating_sub(self.driver_acquired_at_ms)
    }

    /// Time from pickup to arrival at the destination.
    pub fn ride_duration(&self) -> u64 {
        self.completed_at_ms.saturating_sub(self.picked_up_at_ms)
    }

    /// Whole booking, waiting included.
    pub fn total_duration(&self) -> u64 {
        self.completed_at_ms.saturating_sub(self.requested_at_ms)
    }
}

/// Collects completed bookings across all regions.
#[derive(Debug)]
pub struct DispatchTelemetry {
    started_at: Instant,
    completed: Mutex<Vec<CompletedBookingRecord>>,
}

impl DispatchTelemetry {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            completed: Mutex::new(Vec::new()),
        }
    }

    /// Milliseconds since dispatch start; the clock booking timestamps use.
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    pub fn record(&self, record: CompletedBookingRecord) {
        self.completed
            .lock()
            .expect("telemetry mutex poisoned")
            .push(record);
    }

    /// Snapshot of all completed bookings so far.
    pub fn completed_bookings(&self) -> Vec<CompletedBookingRecord> {
        self.completed
            .lock()
            .expect("telemetry mutex poisoned")
            .clone()
    }

    pub fn completed_count(&self) -> usize {
        self.completed
            .lock()
            .expect("telemetry mutex poisoned")
            .len()
    }
}

impl Default for DispatchTelemetry {
    fn default() -> Self {
        Self::new()
    }
}
