mod support;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use dispatch_core::scenario::{build_dispatch, DispatchParams};
use dispatch_core::test_helpers::test_passenger;

#[test]
fn mixed_region_load_completes_every_booking() {
    let params = DispatchParams::default()
        .with_regions(vec![("north".to_string(), 3), ("south".to_string(), 3)])
        .with_fleet(4, 2)
        .with_seed(42);
    let dispatch = Arc::new(build_dispatch(params));

    // Book from several caller threads at once, like independent clients.
    let callers = 4;
    let per_caller = 10;
    let mut handles = Vec::new();
    for c in 0..callers {
        let dispatch = Arc::clone(&dispatch);
        handles.push(thread::spawn(move || {
            let mut tickets = Vec::new();
            for i in 0..per_caller {
                let region = if (c + i) % 2 == 0 { "north" } else { "south" };
                let passenger = test_passenger(&format!("p-{c}-{i}"), 1 + (i as u64 % 5));
                tickets.push(
                    dispatch
                        .book_passenger(passenger, region)
                        .expect("region accepting"),
                );
            }
            tickets
                .into_iter()
                .map(|t| t.wait().expect("booking completes"))
                .collect::<Vec<_>>()
        }));
    }

    let mut passenger_names = HashSet::new();
    for handle in handles {
        for result in handle.join().expect("caller thread panicked") {
            assert!(
                passenger_names.insert(result.passenger_name.clone()),
                "passenger served twice"
            );
        }
    }
    assert_eq!(passenger_names.len(), callers * per_caller);
    assert_eq!(
        dispatch.telemetry().completed_count(),
        callers * per_caller
    );

    dispatch.shutdown();
    // Every driver ends up back in the pool once the load drains.
    assert_eq!(dispatch.idle_driver_count(), 4);
    assert_eq!(dispatch.bookings_awaiting_driver(), 0);
}

#[test]
fn drivers_outnumbered_by_load_are_conserved() {
    let params = DispatchParams::default()
        .with_regions(vec![("north".to_string(), 2)])
        .with_fleet(1, 0)
        .with_seed(7);
    let dispatch = build_dispatch(params);

    let tickets: Vec<_> = (0..10)
        .map(|i| {
            dispatch
                .book_passenger(test_passenger(&format!("p-{i}"), 1), "north")
                .expect("region accepting")
        })
        .collect();

    let mut driver_names = HashSet::new();
    for ticket in tickets {
        driver_names.insert(ticket.wait().expect("booking completes").driver_name);
    }
    // One driver handled everything, one booking at a time.
    assert_eq!(driver_names.len(), 1);

    dispatch.shutdown();
    assert_eq!(dispatch.idle_driver_count(), 1);
}
