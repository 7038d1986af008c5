//! Example: a small dispatch run with event logging turned on.
//!
//! Builds a two-region dispatch with a handful of drivers, books a dozen
//! passengers, and prints each booking outcome as it resolves.

use dispatch_core::agents::Passenger;
use dispatch_core::scenario::{build_dispatch, DispatchParams};

fn main() {
    let params = DispatchParams::default()
        .with_regions(vec![("north".to_string(), 2), ("south".to_string(), 2)])
        .with_fleet(3, 20)
        .with_seed(42)
        .with_log_events(true);
    let dispatch = build_dispatch(params);

    println!("Booking 12 passengers across 2 regions with 3 drivers...");
    let tickets: Vec<_> = (0..12)
        .map(|i| {
            let region = if i % 2 == 0 { "north" } else { "south" };
            let passenger = Passenger::new(format!("passenger-{i}"), 30 + (i as u64 * 5) % 40);
            (
                region,
                dispatch
                    .book_passenger(passenger, region)
                    .expect("region accepting"),
            )
        })
        .collect();

    for (region, ticket) in tickets {
        match ticket.wait() {
            Ok(result) => println!(
                "booking-{} in {region}: {} driven by {} in {:?}",
                result.booking_id, result.passenger_name, result.driver_name, result.total_time
            ),
            Err(error) => println!("booking failed: {error}"),
        }
    }

    dispatch.shutdown();
    println!(
        "Done: {} completed bookings, {} drivers idle again",
        dispatch.telemetry().completed_count(),
        dispatch.idle_driver_count()
    );
}
