//! Scenario setup: build a dispatch with regions and a starting driver fleet.
//!
//! Drivers are registered upfront (they exist for the process lifetime and
//! are recycled between the pool and bookings). With a seed, per-driver RNGs
//! are derived from it so runs are reproducible.

use std::collections::HashMap;

use crate::agents::Driver;
use crate::dispatch::Dispatch;
use crate::pool::MAX_IDLE_DRIVERS;

/// Parameters for building a dispatch scenario.
#[derive(Debug, Clone)]
pub struct DispatchParams {
    /// Region name → maximum simultaneous bookings, in registration order.
    pub regions: Vec<(String, usize)>,
    pub num_drivers: usize,
    /// Upper bound (exclusive) for each driver's simulated pickup delay.
    pub max_pickup_delay_ms: u64,
    /// Hard cap on concurrently idle drivers.
    pub max_idle_drivers: usize,
    /// Random seed for reproducibility (optional; if None, uses entropy).
    pub seed: Option<u64>,
    pub log_events: bool,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            regions: vec![("north".to_string(), 4), ("south".to_string(), 4)],
            num_drivers: 20,
            max_pickup_delay_ms: 100,
            max_idle_drivers: MAX_IDLE_DRIVERS,
            seed: None,
            log_events: false,
        }
    }
}

impl DispatchParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_log_events(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }

    /// Replace the region table.
    pub fn with_regions(mut self, regions: Vec<(String, usize)>) -> Self {
        self.regions = regions;
        self
    }

    /// Set fleet size and the pickup delay bound together.
    pub fn with_fleet(mut self, num_drivers: usize, max_pickup_delay_ms: u64) -> Self {
        self.num_drivers = num_drivers;
        self.max_pickup_delay_ms = max_pickup_delay_ms;
        self
    }

    pub fn with_max_idle_drivers(mut self, max_idle_drivers: usize) -> Self {
        self.max_idle_drivers = max_idle_drivers;
        self
    }
}

/// Build the dispatch and register `num_drivers` idle drivers named
/// `driver-{i}`.
pub fn build_dispatch(params: DispatchParams) -> Dispatch {
    let region_info: HashMap<String, usize> = params.regions.iter().cloned().collect();
    let dispatch =
        Dispatch::with_max_idle_drivers(region_info, params.log_events, params.max_idle_drivers);

    for i in 0..params.num_drivers {
        let name = format!("driver-{i}");
        let driver = match params.seed {
            Some(seed) => {
                Driver::with_seed(name, params.max_pickup_delay_ms, seed.wrapping_add(i as u64))
            }
            None => Driver::new(name, params.max_pickup_delay_ms),
        };
        // The default idle cap exceeds any sane fleet; a false here means
        // the caller configured num_drivers above max_idle_drivers.
        dispatch.add_driver(driver);
    }
    dispatch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_dispatch_registers_regions_and_fleet() {
        let params = DispatchParams::default()
            .with_regions(vec![("east".to_string(), 2)])
            .with_fleet(5, 0)
            .with_seed(42);
        let dispatch = build_dispatch(params);

        assert_eq!(dispatch.region_names(), vec!["east"]);
        assert_eq!(dispatch.idle_driver_count(), 5);
        assert_eq!(dispatch.bookings_awaiting_driver(), 0);
        dispatch.shutdown();
    }

    #[test]
    fn fleet_larger_than_idle_cap_is_truncated() {
        let params = DispatchParams::default()
            .with_regions(vec![("east".to_string(), 2)])
            .with_fleet(5, 0)
            .with_max_idle_drivers(3)
            .with_seed(42);
        let dispatch = build_dispatch(params);
        assert_eq!(dispatch.idle_driver_count(), 3);
        dispatch.shutdown();
    }
}
