//! Parameter variation framework for exploring dispatch load space.
//!
//! Defines parameter sets for single runs and a space builder that either
//! generates the full Cartesian product or randomly samples from it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dispatch_core::distributions::{
    ExponentialTravelTime, TravelTimeDistribution, UniformTravelTime,
};
use dispatch_core::scenario::DispatchParams;

/// Which travel-time distribution a load draws from.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum TravelTimeModel {
    Uniform { min_ms: u64, max_ms: u64 },
    Exponential { mean_ms: f64 },
}

/// One load configuration for a single run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ParameterSet {
    pub experiment_id: String,
    pub run_id: usize,
    pub num_regions: usize,
    pub jobs_per_region: usize,
    pub num_drivers: usize,
    pub num_passengers: usize,
    pub max_pickup_delay_ms: u64,
    pub travel_time: TravelTimeModel,
    pub seed: u64,
}

impl ParameterSet {
    /// Dispatch construction parameters for this run. Regions are named
    /// `region-0..n`.
    pub fn dispatch_params(&self) -> DispatchParams {
        let regions = (0..self.num_regions)
            .map(|i| (format!("region-{i}"), self.jobs_per_region))
            .collect();
        DispatchParams::default()
            .with_regions(regions)
            .with_fleet(self.num_drivers, self.max_pickup_delay_ms)
            .with_seed(self.seed)
    }

    /// The travel-time distribution this run samples passengers from.
    pub fn travel_time_distribution(&self) -> Box<dyn TravelTimeDistribution> {
        match &self.travel_time {
            TravelTimeModel::Uniform { min_ms, max_ms } => {
                Box::new(UniformTravelTime::new(*min_ms, *max_ms, self.seed))
            }
            TravelTimeModel::Exponential { mean_ms } => {
                Box::new(ExponentialTravelTime::new(*mean_ms, self.seed))
            }
        }
    }
}

/// Holds all parameter variations to explore; `generate` builds the grid.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    pub experiment_id: String,
    num_regions: Vec<usize>,
    jobs_per_region: Vec<usize>,
    num_drivers: Vec<usize>,
    num_passengers: Vec<usize>,
    max_pickup_delay_ms: Vec<u64>,
    travel_time: Vec<TravelTimeModel>,
    seed: u64,
}

impl ParameterSpace {
    /// A grid with sensible single-value defaults for every dimension.
    pub fn grid(experiment_id: &str) -> Self {
        Self {
            experiment_id: experiment_id.to_string(),
            num_regions: vec![2],
            jobs_per_region: vec![4],
            num_drivers: vec![4],
            num_passengers: vec![50],
            max_pickup_delay_ms: vec![5],
            travel_time: vec![TravelTimeModel::Uniform {
                min_ms: 1,
                max_ms: 10,
            }],
            seed: 42,
        }
    }

    pub fn num_regions(mut self, values: Vec<usize>) -> Self {
        self.num_regions = values;
        self
    }

    pub fn jobs_per_region(mut self, values: Vec<usize>) -> Self {
        self.jobs_per_region = values;
        self
    }

    pub fn num_drivers(mut self, values: Vec<usize>) -> Self {
        self.num_drivers = values;
        self
    }

    pub fn num_passengers(mut self, values: Vec<usize>) -> Self {
        self.num_passengers = values;
        self
    }

    pub fn max_pickup_delay_ms(mut self, values: Vec<u64>) -> Self {
        self.max_pickup_delay_ms = values;
        self
    }

    pub fn travel_time(mut self, values: Vec<TravelTimeModel>) -> Self {
        self.travel_time = values;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate all combinations using the Cartesian product.
    ///
    /// Combinations without at least one driver and one region are invalid
    /// (a load against them could never finish) and are filtered out.
    pub fn generate(&self) -> Vec<ParameterSet> {
        let mut sets = Vec::new();
        let mut run_id = 0;
        for &num_regions in &self.num_regions {
            for &jobs_per_region in &self.jobs_per_region {
                for &num_drivers in &self.num_drivers {
                    for &num_passengers in &self.num_passengers {
                        for &max_pickup_delay_ms in &self.max_pickup_delay_ms {
                            for travel_time in &self.travel_time {
                                if num_regions == 0 || jobs_per_region == 0 || num_drivers == 0 {
                                    continue;
                                }
                                sets.push(ParameterSet {
                                    experiment_id: self.experiment_id.clone(),
                                    run_id,
                                    num_regions,
                                    jobs_per_region,
                                    num_drivers,
                                    num_passengers,
                                    max_pickup_delay_ms,
                                    travel_time: travel_time.clone(),
                                    seed: self.seed.wrapping_add(run_id as u64),
                                });
                                run_id += 1;
                            }
                        }
                    }
                }
            }
        }
        sets
    }

    /// Randomly sample up to `count` combinations from the grid instead of
    /// running all of them.
    pub fn sample(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        let mut all = self.generate();
        if all.len() <= count {
            return all;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        // Partial Fisher-Yates: the first `count` slots end up a uniform
        // sample of the grid.
        for i in 0..count {
            let j = rng.gen_range(i..all.len());
            all.swap(i, j);
        }
        all.truncate(count);
        all
    }
}
