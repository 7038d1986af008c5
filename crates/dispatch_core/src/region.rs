//! A named partition of dispatch capacity with its own booking pipeline.
//!
//! Each region owns a bounded worker pool sized to its configured maximum
//! simultaneous bookings. Booking tasks borrow a driver from the shared
//! idle pool (blocking there when none is free), run the simulated
//! pickup/drive sequence, recycle the driver, and resolve the caller's
//! ticket.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::agents::Passenger;
use crate::booking::{booking_channel, Booking, BookingError, BookingResult, BookingSlot, BookingTicket};
use crate::executor::WorkerPool;
use crate::logging::EventLog;
use crate::pool::IdleDriverPool;
use crate::telemetry::{CompletedBookingRecord, DispatchTelemetry};

pub struct Region {
    name: String,
    max_simultaneous_jobs: usize,
    accepting: AtomicBool,
    workers: Mutex<Option<WorkerPool>>,
    idle_drivers: Arc<IdleDriverPool>,
    events: Arc<EventLog>,
    telemetry: Arc<DispatchTelemetry>,
    next_booking_id: Arc<AtomicU64>,
}

impl Region {
    pub(crate) fn new(
        name: String,
        max_simultaneous_jobs: usize,
        idle_drivers: Arc<IdleDriverPool>,
        events: Arc<EventLog>,
        telemetry: Arc<DispatchTelemetry>,
        next_booking_id: Arc<AtomicU64>,
    ) -> Self {
        let workers = WorkerPool::new(&name, max_simultaneous_jobs);
        Self {
            name,
            max_simultaneous_jobs,
            accepting: AtomicBool::new(true),
            workers: Mutex::new(Some(workers)),
            idle_drivers,
            events,
            telemetry,
            next_booking_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_simultaneous_jobs(&self) -> usize {
        self.max_simultaneous_jobs
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::SeqCst)
    }

    /// Schedule a booking for this passenger and return a ticket bound to
    /// its eventual outcome.
    ///
    /// A shutting-down region rejects without scheduling anything and
    /// without touching any counter.
    pub fn book_passenger(&self, passenger: Passenger) -> Result<BookingTicket, BookingError> {
        if !self.accepting.load(Ordering::SeqCst) {
            return Err(BookingError::RegionShuttingDown(self.name.clone()));
        }

        let id = self.next_booking_id.fetch_add(1, Ordering::SeqCst);
        let booking = Booking::new(id, passenger.name.clone(), self.name.clone());
        self.events.log(&booking, "creating booking");

        let (slot, ticket) = booking_channel(id);
        let idle_drivers = Arc::clone(&self.idle_drivers);
        let events = Arc::clone(&self.events);
        let telemetry = Arc::clone(&self.telemetry);
        let job = move || run_booking(booking, passenger, slot, idle_drivers, events, telemetry);

        let guard = self.workers.lock().expect("region worker pool mutex poisoned");
        let submitted = match guard.as_ref() {
            Some(workers) => workers.submit(job).is_ok(),
            None => false,
        };
        drop(guard);

        if !submitted {
            // Lost the race with shutdown; same observable outcome.
            return Err(BookingError::RegionShuttingDown(self.name.clone()));
        }
        Ok(ticket)
    }

    /// Stop accepting new bookings without waiting for the drain.
    pub(crate) fn stop_accepting(&self) {
        self.accepting.store(false, Ordering::SeqCst);
    }

    /// Reject all new bookings and wait until every already-scheduled
    /// booking has finished.
    pub fn shutdown(&self) {
        self.stop_accepting();
        let workers = self
            .workers
            .lock()
            .expect("region worker pool mutex poisoned")
            .take();
        if let Some(workers) = workers {
            workers.shutdown();
        }
    }
}

/// Body of one booking task, run on a region worker.
fn run_booking(
    booking: Booking,
    passenger: Passenger,
    slot: BookingSlot,
    idle_drivers: Arc<IdleDriverPool>,
    events: Arc<EventLog>,
    telemetry: Arc<DispatchTelemetry>,
) {
    let requested_at_ms = telemetry.elapsed_ms();
    events.log(&booking, "starting booking, getting driver");

    let Some(mut driver) = idle_drivers.get_driver() else {
        events.log(&booking, "dispatch shut down, abandoning booking");
        slot.complete(Err(BookingError::DispatchShuttingDown));
        return;
    };
    let driver_acquired_at_ms = telemetry.elapsed_ms();
    let trip_started = Instant::now();
    events.log(&booking, "collected driver, picking up passenger");

    driver.pick_up(passenger);
    let picked_up_at_ms = telemetry.elapsed_ms();
    events.log(&booking, "driving to destination");

    let passenger = driver.drive_to_destination();
    let completed_at_ms = telemetry.elapsed_ms();
    let total_time = trip_started.elapsed();
    events.log(&booking, "at destination, driver is now free");

    telemetry.record(CompletedBookingRecord {
        booking_id: booking.id,
        passenger_name: passenger.name.clone(),
        driver_name: driver.name().to_string(),
        region_name: booking.region_name.clone(),
        requested_at_ms,
        driver_acquired_at_ms,
        picked_up_at_ms,
        completed_at_ms,
    });

    let result = BookingResult {
        booking_id: booking.id,
        passenger_name: passenger.name,
        driver_name: driver.name().to_string(),
        total_time,
    };

    // The driver goes back to the pool before the caller can observe the
    // result; completing the ticket never waits on driver availability.
    if !idle_drivers.add_driver(driver) {
        events.log(&booking, "idle pool at capacity, retiring driver");
    }
    slot.complete(Ok(result));
}
