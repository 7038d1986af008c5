//! Passengers and drivers: the two participants of a booking.
//!
//! A driver simulates real-world latency by sleeping the calling worker
//! thread; no lock is ever held across those sleeps.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A passenger waiting to be driven somewhere.
///
/// The travel time is consumed exactly once, by the booking that carries
/// this passenger to their destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub name: String,
    /// How long the simulated ride to the destination takes.
    pub travel_time_ms: u64,
}

impl Passenger {
    pub fn new(name: impl Into<String>, travel_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            travel_time_ms,
        }
    }
}

/// A driver that can collect a passenger and drive them to their destination.
///
/// A driver is exclusively owned by whichever context currently holds it:
/// either the idle pool or a single in-flight booking. Ownership moves by
/// value through the pool, so two bookings can never share one driver.
#[derive(Debug)]
pub struct Driver {
    name: String,
    max_pickup_delay_ms: u64,
    current_passenger: Option<Passenger>,
    rng: StdRng,
}

impl Driver {
    pub fn new(name: impl Into<String>, max_pickup_delay_ms: u64) -> Self {
        Self {
            name: name.into(),
            max_pickup_delay_ms,
            current_passenger: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible pickup delays.
    pub fn with_seed(name: impl Into<String>, max_pickup_delay_ms: u64, seed: u64) -> Self {
        Self {
            name: name.into(),
            max_pickup_delay_ms,
            current_passenger: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_pickup_delay_ms(&self) -> u64 {
        self.max_pickup_delay_ms
    }

    pub fn current_passenger(&self) -> Option<&Passenger> {
        self.current_passenger.as_ref()
    }

    /// Stores the passenger as the driver's current passenger, then sleeps
    /// the calling thread for a uniform random duration in
    /// `[0, max_pickup_delay_ms)`. A zero bound means no delay.
    pub fn pick_up(&mut self, passenger: Passenger) {
        self.current_passenger = Some(passenger);
        let delay_ms = if self.max_pickup_delay_ms == 0 {
            0
        } else {
            self.rng.gen_range(0..self.max_pickup_delay_ms)
        };
        if delay_ms > 0 {
            thread::sleep(Duration::from_millis(delay_ms));
        }
    }

    /// Sleeps the calling thread for the current passenger's travel time,
    /// then hands the passenger back and clears the assignment.
    ///
    /// `pick_up` must have been called first.
    pub fn drive_to_destination(&mut self) -> Passenger {
        let passenger = self
            .current_passenger
            .take()
            .expect("pick_up must precede drive_to_destination");
        if passenger.travel_time_ms > 0 {
            thread::sleep(Duration::from_millis(passenger.travel_time_ms));
        }
        passenger
    }
}
