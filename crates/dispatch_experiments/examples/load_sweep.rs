//! Example: sweep driver supply and export the results.
//!
//! Runs the driver-supply parameter space in parallel, prints a summary per
//! configuration, and writes a CSV next to the working directory.

use dispatch_experiments::parameter_spaces::driver_supply_space;
use dispatch_experiments::{export_to_csv, run_parallel_experiments};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating parameter sets...");
    let space = driver_supply_space();
    let parameter_sets = space.generate();
    println!("Generated {} configurations", parameter_sets.len());

    println!("Running loads in parallel...");
    let results = run_parallel_experiments(parameter_sets.clone(), None);

    println!("\ndrivers  completed  avg_wait_ms  p90_wait_ms  throughput/s");
    for (params, result) in parameter_sets.iter().zip(&results) {
        println!(
            "{:>7}  {:>9}  {:>11.1}  {:>11.1}  {:>12.1}",
            params.num_drivers,
            result.completed_bookings,
            result.avg_wait_for_driver_ms,
            result.p90_wait_for_driver_ms,
            result.throughput_bookings_per_s
        );
    }

    let out = "driver_supply_results.csv";
    export_to_csv(&results, &parameter_sets, out)?;
    println!("\nResults written to {out}");
    Ok(())
}
