//! Load execution: drive one dispatch configuration to completion, or run
//! many configurations in parallel with rayon.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use dispatch_core::agents::Passenger;
use dispatch_core::scenario::build_dispatch;

use crate::metrics::{extract_metrics, LoadResult};
use crate::parameters::ParameterSet;

/// Run one parameter set to completion and extract metrics.
///
/// Builds the dispatch, submits every passenger, waits on all tickets,
/// shuts the dispatch down, and aggregates the telemetry.
pub fn run_single_load(param_set: &ParameterSet) -> LoadResult {
    let dispatch = build_dispatch(param_set.dispatch_params());
    let travel_times = param_set.travel_time_distribution();

    let start = Instant::now();
    let mut tickets = Vec::with_capacity(param_set.num_passengers);
    let mut rejected = 0usize;
    for i in 0..param_set.num_passengers {
        let region = format!("region-{}", i % param_set.num_regions);
        let passenger = Passenger::new(format!("passenger-{i}"), travel_times.sample_ms(i as u64));
        match dispatch.book_passenger(passenger, &region) {
            Ok(ticket) => tickets.push(ticket),
            Err(_) => rejected += 1,
        }
    }

    let mut failed = 0usize;
    for ticket in tickets {
        if ticket.wait().is_err() {
            failed += 1;
        }
    }
    let elapsed_ms = start.elapsed().as_millis() as f64;
    dispatch.shutdown();

    extract_metrics(
        &dispatch.telemetry().completed_bookings(),
        param_set.num_passengers,
        param_set.num_drivers,
        rejected,
        failed,
        elapsed_ms,
    )
}

/// Run multiple loads in parallel.
///
/// Uses rayon to execute loads concurrently across available CPU cores.
/// Results come back in the same order as the input parameter sets.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Vec<LoadResult> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// As [`run_parallel_experiments`], with the progress bar optional.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Vec<LoadResult> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let pool = if let Some(threads) = num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("Failed to create thread pool")
    } else {
        rayon::ThreadPoolBuilder::new()
            .build()
            .expect("Failed to create thread pool")
    };

    let pb_clone = pb.clone();
    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_load(param_set);
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterSpace;

    #[test]
    fn single_load_completes_every_booking() {
        let sets = ParameterSpace::grid("test")
            .num_drivers(vec![2])
            .num_passengers(vec![10])
            .generate();
        let result = run_single_load(&sets[0]);

        assert_eq!(result.completed_bookings, 10);
        assert_eq!(result.rejected_bookings, 0);
        assert_eq!(result.failed_bookings, 0);
        assert!(result.throughput_bookings_per_s > 0.0);
    }

    #[test]
    fn parallel_experiments_cover_the_whole_grid() {
        let sets = ParameterSpace::grid("test")
            .num_drivers(vec![1, 2])
            .num_passengers(vec![5, 10])
            .generate();
        let results = run_parallel_experiments_with_progress(sets, Some(2), false);

        assert_eq!(results.len(), 4);
        for result in &results {
            assert_eq!(result.completed_bookings, result.total_passengers);
        }
    }
}
