//! Top-level dispatch: owns the shared idle-driver pool and the regions,
//! routes bookings by region name, and coordinates graceful shutdown.

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::agents::{Driver, Passenger};
use crate::booking::{Booking, BookingError, BookingTicket};
use crate::logging::EventLog;
use crate::pool::{IdleDriverPool, MAX_IDLE_DRIVERS};
use crate::region::Region;
use crate::telemetry::DispatchTelemetry;

pub struct Dispatch {
    idle_drivers: Arc<IdleDriverPool>,
    regions: HashMap<String, Region>,
    events: Arc<EventLog>,
    telemetry: Arc<DispatchTelemetry>,
}

impl Dispatch {
    /// Build one region per `region_info` entry (name → maximum
    /// simultaneous bookings), all sharing one idle-driver pool.
    pub fn new(region_info: HashMap<String, usize>, log_events: bool) -> Self {
        Self::with_max_idle_drivers(region_info, log_events, MAX_IDLE_DRIVERS)
    }

    /// As [`new`](Self::new), with an explicit idle-driver cap.
    pub fn with_max_idle_drivers(
        region_info: HashMap<String, usize>,
        log_events: bool,
        max_idle_drivers: usize,
    ) -> Self {
        let idle_drivers = Arc::new(IdleDriverPool::with_capacity(max_idle_drivers));
        let events = Arc::new(EventLog::new(log_events));
        let telemetry = Arc::new(DispatchTelemetry::new());
        let next_booking_id = Arc::new(AtomicU64::new(1));

        let regions = region_info
            .into_iter()
            .map(|(name, max_simultaneous_jobs)| {
                let region = Region::new(
                    name.clone(),
                    max_simultaneous_jobs,
                    Arc::clone(&idle_drivers),
                    Arc::clone(&events),
                    Arc::clone(&telemetry),
                    Arc::clone(&next_booking_id),
                );
                (name, region)
            })
            .collect();

        Self {
            idle_drivers,
            regions,
            events,
            telemetry,
        }
    }

    /// Register a driver as idle. Returns false when the idle cap is hit;
    /// the caller decides whether to retry or discard.
    pub fn add_driver(&self, driver: Driver) -> bool {
        self.idle_drivers.add_driver(driver)
    }

    /// Book a passenger into the named region.
    ///
    /// An unconfigured name is an error, never a fallback to some default
    /// region.
    pub fn book_passenger(
        &self,
        passenger: Passenger,
        region_name: &str,
    ) -> Result<BookingTicket, BookingError> {
        match self.regions.get(region_name) {
            Some(region) => region.book_passenger(passenger),
            None => Err(BookingError::UnknownRegion(region_name.to_string())),
        }
    }

    /// Number of booking tasks, across all regions, currently blocked
    /// waiting for an idle driver. Snapshot-consistent; never negative.
    pub fn bookings_awaiting_driver(&self) -> usize {
        self.idle_drivers.awaiting_count()
    }

    /// Current number of idle drivers in the shared pool.
    pub fn idle_driver_count(&self) -> usize {
        self.idle_drivers.idle_count()
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    pub fn region_names(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    pub fn telemetry(&self) -> &DispatchTelemetry {
        &self.telemetry
    }

    /// Advisory event logging; see [`EventLog::log`].
    pub fn log_event(&self, booking: &Booking, message: &str) {
        self.events.log(booking, message);
    }

    /// Stop accepting bookings everywhere, wake any tasks still parked
    /// waiting for a driver, and drain every region.
    ///
    /// Returns only once every accepted booking has completed or
    /// explicitly failed; afterwards every `book_passenger` is rejected.
    pub fn shutdown(&self) {
        for region in self.regions.values() {
            region.stop_accepting();
        }
        // Parked waiters either take a remaining driver or fail their
        // ticket; nobody stays blocked through the drain below.
        self.idle_drivers.close();
        for region in self.regions.values() {
            region.shutdown();
        }
    }
}
