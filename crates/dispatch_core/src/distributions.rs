//! Probability distributions for passenger travel times.
//!
//! Load generators use these to shape demand. Sampling is stateless and
//! reproducible: each sample derives its own RNG from the seed plus the
//! sample index.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trait for sampling passenger travel times (in milliseconds).
pub trait TravelTimeDistribution: Send + Sync + std::fmt::Debug {
    /// Sample the travel time for the `passenger_index`-th passenger.
    fn sample_ms(&self, passenger_index: u64) -> u64;
}

/// Uniform travel times in `[min_ms, max_ms)`.
#[derive(Debug, Clone)]
pub struct UniformTravelTime {
    pub min_ms: u64,
    pub max_ms: u64,
    /// Seed for RNG (for reproducibility).
    pub seed: u64,
}

impl UniformTravelTime {
    pub fn new(min_ms: u64, max_ms: u64, seed: u64) -> Self {
        Self { min_ms, max_ms, seed }
    }
}

impl TravelTimeDistribution for UniformTravelTime {
    fn sample_ms(&self, passenger_index: u64) -> u64 {
        if self.min_ms >= self.max_ms {
            // Empty range means a fixed travel time, not an error.
            return self.min_ms;
        }
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(passenger_index));
        rng.gen_range(self.min_ms..self.max_ms)
    }
}

/// Exponentially distributed travel times with the given mean.
#[derive(Debug, Clone)]
pub struct ExponentialTravelTime {
    pub mean_ms: f64,
    /// Seed for RNG (for reproducibility).
    pub seed: u64,
}

impl ExponentialTravelTime {
    pub fn new(mean_ms: f64, seed: u64) -> Self {
        Self {
            mean_ms: mean_ms.max(0.0),
            seed,
        }
    }
}

impl TravelTimeDistribution for ExponentialTravelTime {
    fn sample_ms(&self, passenger_index: u64) -> u64 {
        if self.mean_ms <= 0.0 {
            return 0;
        }
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(passenger_index));
        // Sample from exponential: -ln(U) * mean, where U is uniform [0,1)
        let u: f64 = rng.gen();
        let u = u.max(1e-10); // Avoid log(0)
        (-u.ln() * self.mean_ms).round() as u64
    }
}
