//! Criterion benchmarks for route planning, ribbon geometry and a full
//! headless taxi journey.
//!
//! Run with: cargo bench -p simulation --bench route_bench --features bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::config::RibbonConfig;
use simulation::geometry::GridPoint;
use simulation::route_planner::{densify, plan, plan_raw};
use simulation::ribbon::build_ribbon;
use simulation::session::{SessionPhase, SessionRequest};
use simulation::test_harness::TestSession;
use simulation::venues::{DestinationId, VenueRegistry};

// ---------------------------------------------------------------------------
// Benchmark: grid planner
// ---------------------------------------------------------------------------

fn bench_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_planner");
    let venues = VenueRegistry::default();

    for id in DestinationId::ALL {
        let Some((start, end)) = venues.route_endpoints(id) else {
            continue;
        };
        group.bench_function(format!("plan_{}", id.label()), |b| {
            b.iter(|| black_box(plan(black_box(start), black_box(end))));
        });
    }

    // Corner to corner: the longest legal route.
    let start = GridPoint::new(300.0, 300.0);
    let end = GridPoint::new(-300.0, -300.0);
    let raw = plan_raw(start, end);
    group.bench_function("densify_corner_to_corner", |b| {
        b.iter(|| black_box(densify(black_box(&raw), 10)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: ribbon tube rebuild (done every time the reveal grows)
// ---------------------------------------------------------------------------

fn bench_ribbon(c: &mut Criterion) {
    let mut group = c.benchmark_group("ribbon");
    let config = RibbonConfig::default();
    let route = plan(GridPoint::new(200.0, 200.0), GridPoint::new(-150.0, -100.0));

    group.bench_function("build_full_route", |b| {
        b.iter(|| black_box(build_ribbon(black_box(route.points()), &config)));
    });

    let half = &route.points()[..route.len() / 2];
    group.bench_function("build_half_route", |b| {
        b.iter(|| black_box(build_ribbon(black_box(half), &config)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: headless journey, generate to arrival
// ---------------------------------------------------------------------------

fn bench_journey(c: &mut Criterion) {
    let mut group = c.benchmark_group("journey");
    group.sample_size(10);

    group.bench_function("taxi_to_wedding", |b| {
        b.iter(|| {
            let mut session = TestSession::new().with_destination(DestinationId::Wedding);
            session.request(SessionRequest::GenerateRoute);
            session.request(SessionRequest::StartJourney);
            session.tick_until_phase(SessionPhase::Arrived, 20_000);
            black_box(session.arrivals().len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_planner, bench_ribbon, bench_journey);
criterion_main!(benches);
