//! Parallel load experiments for the ride-dispatch engine.
//!
//! This crate drives the dispatch engine with synthetic passenger loads,
//! runs many configurations in parallel, extracts timing metrics, and
//! exports the results for analysis.
//!
//! # Quick Start
//!
//! ```no_run
//! use dispatch_experiments::{run_parallel_experiments, ParameterSpace};
//!
//! // Define a parameter grid
//! let space = ParameterSpace::grid("supply-sweep")
//!     .num_drivers(vec![2, 4, 8])
//!     .num_passengers(vec![50, 100]);
//!
//! // Generate parameter sets and run them in parallel
//! let parameter_sets = space.generate();
//! let results = run_parallel_experiments(parameter_sets, None);
//!
//! for result in &results {
//!     println!("throughput: {:.1} bookings/s", result.throughput_bookings_per_s);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: parameter sets and grid generation
//! - [`parameter_spaces`]: predefined spaces for common sweeps
//! - [`runner`]: load execution, parallelized with rayon
//! - [`metrics`]: timing statistics extracted from completed loads
//! - [`export`]: CSV/JSON result export

pub mod export;
pub mod metrics;
pub mod parameter_spaces;
pub mod parameters;
pub mod runner;

pub use export::{export_to_csv, export_to_json};
pub use metrics::LoadResult;
pub use parameters::{ParameterSet, ParameterSpace, TravelTimeModel};
pub use runner::{run_parallel_experiments, run_single_load};
