//! Metrics extraction from completed dispatch loads.

use dispatch_core::telemetry::CompletedBookingRecord;

/// Aggregated metrics from a single load run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoadResult {
    /// Total number of passengers submitted.
    pub total_passengers: usize,
    /// Total number of drivers in the fleet.
    pub total_drivers: usize,
    /// Bookings that completed with a result.
    pub completed_bookings: usize,
    /// Bookings rejected before scheduling (shutdown or unknown region).
    pub rejected_bookings: usize,
    /// Bookings that failed after being scheduled.
    pub failed_bookings: usize,
    /// Wall-clock duration of the whole load.
    pub elapsed_ms: f64,
    /// Completed bookings per second of wall-clock time.
    pub throughput_bookings_per_s: f64,
    /// Average time a booking waited for a driver, in milliseconds.
    pub avg_wait_for_driver_ms: f64,
    pub median_wait_for_driver_ms: f64,
    pub p90_wait_for_driver_ms: f64,
    /// Average total booking duration (wait + pickup + ride).
    pub avg_total_ms: f64,
    pub median_total_ms: f64,
    pub p90_total_ms: f64,
}

/// Calculate (average, median, p90) from a vector of values.
fn calculate_stats(values: &[u64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let avg = sorted.iter().sum::<u64>() as f64 / sorted.len() as f64;
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) as f64 / 2.0
    } else {
        sorted[sorted.len() / 2] as f64
    };
    let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
    let p90 = sorted[p90_idx.min(sorted.len() - 1)] as f64;

    (avg, median, p90)
}

/// Build a [`LoadResult`] from completed booking records and run counters.
pub fn extract_metrics(
    records: &[CompletedBookingRecord],
    total_passengers: usize,
    total_drivers: usize,
    rejected_bookings: usize,
    failed_bookings: usize,
    elapsed_ms: f64,
) -> LoadResult {
    let waits: Vec<u64> = records.iter().map(|r| r.wait_for_driver()).collect();
    let totals: Vec<u64> = records.iter().map(|r| r.total_duration()).collect();
    let (avg_wait, median_wait, p90_wait) = calculate_stats(&waits);
    let (avg_total, median_total, p90_total) = calculate_stats(&totals);

    let throughput = if elapsed_ms > 0.0 {
        records.len() as f64 / (elapsed_ms / 1000.0)
    } else {
        0.0
    };

    LoadResult {
        total_passengers,
        total_drivers,
        completed_bookings: records.len(),
        rejected_bookings,
        failed_bookings,
        elapsed_ms,
        throughput_bookings_per_s: throughput,
        avg_wait_for_driver_ms: avg_wait,
        median_wait_for_driver_ms: median_wait,
        p90_wait_for_driver_ms: p90_wait,
        avg_total_ms: avg_total,
        median_total_ms: median_total,
        p90_total_ms: p90_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(booking_id: u64, requested: u64, acquired: u64, completed: u64) -> CompletedBookingRecord {
        CompletedBookingRecord {
            booking_id,
            passenger_name: format!("p-{booking_id}"),
            driver_name: "d-0".into(),
            region_name: "region-0".into(),
            requested_at_ms: requested,
            driver_acquired_at_ms: acquired,
            picked_up_at_ms: acquired,
            completed_at_ms: completed,
        }
    }

    #[test]
    fn stats_cover_avg_median_and_p90() {
        let records: Vec<_> = (0..10)
            .map(|i| record(i, 0, i * 10, i * 10 + 100))
            .collect();
        let result = extract_metrics(&records, 10, 2, 0, 0, 1000.0);

        assert_eq!(result.completed_bookings, 10);
        assert_eq!(result.avg_wait_for_driver_ms, 45.0);
        assert_eq!(result.median_wait_for_driver_ms, 45.0);
        assert_eq!(result.p90_wait_for_driver_ms, 80.0);
        assert_eq!(result.throughput_bookings_per_s, 10.0);
    }

    #[test]
    fn empty_records_produce_zeroed_stats() {
        let result = extract_metrics(&[], 5, 2, 5, 0, 100.0);
        assert_eq!(result.completed_bookings, 0);
        assert_eq!(result.rejected_bookings, 5);
        assert_eq!(result.avg_wait_for_driver_ms, 0.0);
        assert_eq!(result.throughput_bookings_per_s, 0.0);
    }
}
