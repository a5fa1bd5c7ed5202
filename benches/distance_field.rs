//! Benchmark per-sensor search and rasterization.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vastu_heat::{
    SampleGrid, Topology, TopologyBuilder, aggregate, compute_fields, compute_sensor_field,
    search_sensor,
};

/// Row of `n` square rooms joined by doors, one sensor per room.
fn room_row(n: usize) -> Topology {
    let mut builder = TopologyBuilder::new();
    for i in 0..n {
        let x0 = i as f64 * 4.0;
        let name = format!("r{i}");
        builder = builder
            .room(&name, &[(x0, 0.0), (x0 + 4.0, 0.0), (x0 + 4.0, 4.0), (x0, 4.0)])
            .sensor(&name, &format!("t{i}"), (x0 + 1.0, 1.5), Some(18.0 + i as f64));
        if i > 0 {
            let prev = format!("r{}", i - 1);
            builder = builder.door(&format!("d{i}"), &prev, &name, (x0, 1.5), (x0, 2.5));
        }
    }
    builder.build().expect("room row builds")
}

fn bench_search(c: &mut Criterion) {
    let topology = room_row(6);
    c.bench_function("search_sensor_6_rooms", |b| {
        b.iter(|| search_sensor(black_box(&topology), 0))
    });
}

fn bench_sensor_field_resolutions(c: &mut Criterion) {
    let topology = room_row(4);
    let mut group = c.benchmark_group("sensor_field_resolution");

    for resolution in [1.0, 2.0, 5.0] {
        let grid = SampleGrid::from_topology(&topology, resolution);
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &grid,
            |b, grid| b.iter(|| compute_sensor_field(black_box(&topology), grid, 0)),
        );
    }

    group.finish();
}

fn bench_parallel_vs_serial(c: &mut Criterion) {
    let topology = room_row(8);
    let grid = SampleGrid::from_topology(&topology, 2.0);
    let mut group = c.benchmark_group("compute_fields");

    for parallel in [false, true] {
        group.bench_with_input(
            BenchmarkId::from_parameter(if parallel { "parallel" } else { "serial" }),
            &parallel,
            |b, &parallel| b.iter(|| compute_fields(&topology, &grid, parallel, None)),
        );
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let topology = room_row(8);
    let grid = SampleGrid::from_topology(&topology, 5.0);
    let fields = compute_fields(&topology, &grid, true, None).expect("fields compute");
    let readings: Vec<_> = topology.sensors.iter().map(|s| s.initial_reading).collect();
    let closed = vec![false; topology.doors.len()];

    c.bench_function("aggregate_8_sensors", |b| {
        b.iter(|| aggregate(black_box(&fields), &readings, &closed))
    });
}

criterion_group!(
    benches,
    bench_search,
    bench_sensor_field_resolutions,
    bench_parallel_vs_serial,
    bench_aggregate
);
criterion_main!(benches);
