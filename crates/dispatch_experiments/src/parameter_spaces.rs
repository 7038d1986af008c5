//! Predefined parameter spaces for common sweeps.

use crate::parameters::{ParameterSpace, TravelTimeModel};

/// Tiny space for smoke tests and quick iteration.
pub fn minimal_space() -> ParameterSpace {
    ParameterSpace::grid("minimal")
        .num_drivers(vec![2])
        .num_passengers(vec![20])
}

/// How does driver supply affect waiting time at a fixed demand level?
pub fn driver_supply_space() -> ParameterSpace {
    ParameterSpace::grid("driver-supply")
        .num_drivers(vec![1, 2, 4, 8, 16])
        .num_passengers(vec![100])
        .max_pickup_delay_ms(vec![5])
}

/// How does region concurrency shape throughput for a fixed fleet?
pub fn region_capacity_space() -> ParameterSpace {
    ParameterSpace::grid("region-capacity")
        .num_regions(vec![1, 2, 4])
        .jobs_per_region(vec![1, 2, 4, 8])
        .num_drivers(vec![8])
        .num_passengers(vec![100])
}

/// Compare demand shapes: steady uniform rides against bursty
/// exponential ones with the same mean.
pub fn demand_shape_space() -> ParameterSpace {
    ParameterSpace::grid("demand-shape")
        .num_drivers(vec![4])
        .num_passengers(vec![100])
        .travel_time(vec![
            TravelTimeModel::Uniform { min_ms: 5, max_ms: 15 },
            TravelTimeModel::Exponential { mean_ms: 10.0 },
        ])
}
