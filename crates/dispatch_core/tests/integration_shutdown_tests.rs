mod support;

use std::collections::HashMap;
use std::time::Duration;

use dispatch_core::booking::BookingError;
use dispatch_core::dispatch::Dispatch;
use dispatch_core::test_helpers::{single_region_dispatch, test_driver, test_passenger};
use support::wait_until;

fn two_region_dispatch() -> Dispatch {
    let mut region_info = HashMap::new();
    region_info.insert("north".to_string(), 2);
    region_info.insert("south".to_string(), 2);
    Dispatch::new(region_info, false)
}

#[test]
fn every_region_rejects_after_dispatch_shutdown() {
    let dispatch = two_region_dispatch();
    dispatch.shutdown();

    for region in ["north", "south"] {
        let outcome = dispatch.book_passenger(test_passenger("late", 5), region);
        assert_eq!(
            outcome.err(),
            Some(BookingError::RegionShuttingDown(region.to_string()))
        );
    }
    assert_eq!(dispatch.bookings_awaiting_driver(), 0);
}

#[test]
fn accepted_bookings_complete_through_shutdown() {
    let dispatch = single_region_dispatch("north", 2);
    assert!(dispatch.add_driver(test_driver("d-0", 2)));
    assert!(dispatch.add_driver(test_driver("d-1", 2)));

    // Twice as many bookings as workers: half are still queued when the
    // shutdown starts, and the drain must run them anyway.
    let tickets: Vec<_> = (0..4)
        .map(|i| {
            dispatch
                .book_passenger(test_passenger(&format!("p-{i}"), 10), "north")
                .expect("region accepting")
        })
        .collect();

    dispatch.shutdown();

    for ticket in tickets {
        ticket.wait().expect("accepted booking completed");
    }
    assert_eq!(dispatch.telemetry().completed_count(), 4);
}

#[test]
fn driver_starved_booking_fails_instead_of_hanging() {
    let dispatch = single_region_dispatch("north", 2);

    let ticket = dispatch
        .book_passenger(test_passenger("alex", 50), "north")
        .expect("region accepting");
    assert!(
        wait_until(
            || dispatch.bookings_awaiting_driver() == 1,
            Duration::from_secs(2)
        ),
        "booking never parked waiting for a driver"
    );

    dispatch.shutdown();

    assert_eq!(ticket.wait(), Err(BookingError::DispatchShuttingDown));
    assert_eq!(dispatch.bookings_awaiting_driver(), 0);
    assert_eq!(dispatch.telemetry().completed_count(), 0);
}

#[test]
fn region_shutdown_leaves_other_regions_accepting() {
    let dispatch = two_region_dispatch();
    assert!(dispatch.add_driver(test_driver("d-0", 0)));

    dispatch
        .region("north")
        .expect("configured region")
        .shutdown();

    let rejected = dispatch.book_passenger(test_passenger("p-0", 5), "north");
    assert_eq!(
        rejected.err(),
        Some(BookingError::RegionShuttingDown("north".to_string()))
    );

    let served = dispatch
        .book_passenger(test_passenger("p-1", 5), "south")
        .expect("south still accepting")
        .wait()
        .expect("booking completes");
    assert_eq!(served.driver_name, "d-0");
    dispatch.shutdown();
}

#[test]
fn rejected_bookings_leave_no_trace() {
    let dispatch = single_region_dispatch("north", 2);
    dispatch
        .region("north")
        .expect("configured region")
        .shutdown();

    for i in 0..5 {
        assert!(dispatch
            .book_passenger(test_passenger(&format!("p-{i}"), 5), "north")
            .is_err());
    }
    assert_eq!(dispatch.bookings_awaiting_driver(), 0);
    assert_eq!(dispatch.telemetry().completed_count(), 0);
    dispatch.shutdown();
}
