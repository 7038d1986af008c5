//! Performance benchmarks for dispatch_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispatch_core::agents::Passenger;
use dispatch_core::scenario::{build_dispatch, DispatchParams};

fn bench_booking_throughput(c: &mut Criterion) {
    // Zero delays: measures engine overhead (queueing, matching, channel
    // completion), not sleep time.
    let scenarios = vec![("small", 4, 50), ("medium", 8, 200), ("large", 16, 500)];

    let mut group = c.benchmark_group("booking_throughput");
    group.sample_size(10);
    for (name, drivers, passengers) in scenarios {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(drivers, passengers),
            |b, &(drivers, passengers)| {
                b.iter(|| {
                    let params = DispatchParams::default()
                        .with_regions(vec![("north".to_string(), 4), ("south".to_string(), 4)])
                        .with_fleet(drivers, 0)
                        .with_seed(42);
                    let dispatch = build_dispatch(params);

                    let tickets: Vec<_> = (0..passengers)
                        .map(|i| {
                            let region = if i % 2 == 0 { "north" } else { "south" };
                            dispatch
                                .book_passenger(Passenger::new(format!("p-{i}"), 0), region)
                                .expect("region accepting")
                        })
                        .collect();
                    for ticket in tickets {
                        black_box(ticket.wait().expect("booking completes"));
                    }
                    dispatch.shutdown();
                });
            },
        );
    }
    group.finish();
}

fn bench_pool_handoff(c: &mut Criterion) {
    use dispatch_core::agents::Driver;
    use dispatch_core::pool::IdleDriverPool;

    c.bench_function("pool_add_get_handoff", |b| {
        let pool = IdleDriverPool::new();
        pool.add_driver(Driver::with_seed("d-0", 0, 1));
        b.iter(|| {
            let driver = pool.get_driver().expect("driver queued");
            black_box(pool.add_driver(driver));
        });
    });
}

criterion_group!(benches, bench_booking_throughput, bench_pool_handoff);
criterion_main!(benches);
