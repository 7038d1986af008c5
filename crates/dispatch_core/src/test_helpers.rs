//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across
//! test files.

use std::collections::HashMap;

use crate::agents::{Driver, Passenger};
use crate::dispatch::Dispatch;

/// Seed shared by test fixtures so runs are reproducible.
pub const TEST_SEED: u64 = 42;

/// A passenger fixture with the given travel time.
pub fn test_passenger(name: &str, travel_time_ms: u64) -> Passenger {
    Passenger::new(name, travel_time_ms)
}

/// A deterministically seeded driver fixture.
pub fn test_driver(name: &str, max_pickup_delay_ms: u64) -> Driver {
    Driver::with_seed(name, max_pickup_delay_ms, TEST_SEED)
}

/// A dispatch with one region and no drivers registered yet.
pub fn single_region_dispatch(region: &str, max_simultaneous_jobs: usize) -> Dispatch {
    let mut region_info = HashMap::new();
    region_info.insert(region.to_string(), max_simultaneous_jobs);
    Dispatch::new(region_info, false)
}
