//! Result export: CSV (parameters + metrics paired by index) and JSON.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::metrics::LoadResult;
use crate::parameters::{ParameterSet, TravelTimeModel};

/// One flat CSV row: parameters followed by metrics.
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    experiment_id: &'a str,
    run_id: usize,
    num_regions: usize,
    jobs_per_region: usize,
    num_drivers: usize,
    num_passengers: usize,
    max_pickup_delay_ms: u64,
    travel_time_model: String,
    seed: u64,
    completed_bookings: usize,
    rejected_bookings: usize,
    failed_bookings: usize,
    elapsed_ms: f64,
    throughput_bookings_per_s: f64,
    avg_wait_for_driver_ms: f64,
    median_wait_for_driver_ms: f64,
    p90_wait_for_driver_ms: f64,
    avg_total_ms: f64,
    median_total_ms: f64,
    p90_total_ms: f64,
}

fn travel_time_label(model: &TravelTimeModel) -> String {
    match model {
        TravelTimeModel::Uniform { min_ms, max_ms } => format!("uniform({min_ms},{max_ms})"),
        TravelTimeModel::Exponential { mean_ms } => format!("exponential({mean_ms})"),
    }
}

fn ensure_not_empty(results: &[LoadResult]) -> Result<(), Box<dyn Error>> {
    if results.is_empty() {
        return Err("no results to export".into());
    }
    Ok(())
}

/// Export results with their parameter sets to CSV.
///
/// Parameters and results are paired by index, so both slices must have the
/// same length.
pub fn export_to_csv(
    results: &[LoadResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    ensure_not_empty(results)?;
    if results.len() != parameter_sets.len() {
        return Err("results and parameter sets must pair up by index".into());
    }

    let mut writer = csv::Writer::from_path(path)?;
    for (params, result) in parameter_sets.iter().zip(results) {
        writer.serialize(CsvRow {
            experiment_id: &params.experiment_id,
            run_id: params.run_id,
            num_regions: params.num_regions,
            jobs_per_region: params.jobs_per_region,
            num_drivers: params.num_drivers,
            num_passengers: params.num_passengers,
            max_pickup_delay_ms: params.max_pickup_delay_ms,
            travel_time_model: travel_time_label(&params.travel_time),
            seed: params.seed,
            completed_bookings: result.completed_bookings,
            rejected_bookings: result.rejected_bookings,
            failed_bookings: result.failed_bookings,
            elapsed_ms: result.elapsed_ms,
            throughput_bookings_per_s: result.throughput_bookings_per_s,
            avg_wait_for_driver_ms: result.avg_wait_for_driver_ms,
            median_wait_for_driver_ms: result.median_wait_for_driver_ms,
            p90_wait_for_driver_ms: result.p90_wait_for_driver_ms,
            avg_total_ms: result.avg_total_ms,
            median_total_ms: result.median_total_ms,
            p90_total_ms: result.p90_total_ms,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Export results to a JSON array.
pub fn export_to_json(
    results: &[LoadResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    ensure_not_empty(results)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::extract_metrics;
    use crate::parameters::ParameterSpace;

    fn sample() -> (Vec<LoadResult>, Vec<ParameterSet>) {
        let sets = ParameterSpace::grid("export-test")
            .num_drivers(vec![1, 2])
            .generate();
        let results = sets
            .iter()
            .map(|s| extract_metrics(&[], s.num_passengers, s.num_drivers, 0, 0, 10.0))
            .collect();
        (results, sets)
    }

    #[test]
    fn csv_export_writes_one_row_per_run() {
        let (results, sets) = sample();
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results.csv");
        export_to_csv(&results, &sets, &path).expect("csv export");

        let contents = std::fs::read_to_string(&path).expect("read csv");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 1 + results.len(), "header plus one row per run");
        assert!(lines[0].contains("experiment_id"));
        assert!(lines[1].contains("export-test"));
    }

    #[test]
    fn json_export_round_trips() {
        let (results, _) = sample();
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results.json");
        export_to_json(&results, &path).expect("json export");

        let contents = std::fs::read_to_string(&path).expect("read json");
        let parsed: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(results.len()));
    }

    #[test]
    fn empty_results_are_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(export_to_csv(&[], &[], dir.path().join("x.csv")).is_err());
        assert!(export_to_json(&[], dir.path().join("x.json")).is_err());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let (results, _) = sample();
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(export_to_csv(&results, &[], dir.path().join("x.csv")).is_err());
    }
}
