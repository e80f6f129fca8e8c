//! Criterion micro-benchmarks for the state-change cascade.

use std::hint::black_box;

use chip_bench::{build_circuit, bus_profile, bus_rows, scattered_profile};
use chip_core::{ComponentPos, UpdateFlags};
use chip_engine::Circuit;
use chip_test_utils::fixtures::torch_feedback_loop;
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: Flip every bus lever on and off again.
fn bench_bus_toggle(c: &mut Criterion) {
    let mut circuit = build_circuit(&bus_profile());
    let levers: Vec<ComponentPos> = bus_rows().map(|y| ComponentPos::new(0, y)).collect();

    c.bench_function("cascade_bus_toggle", |b| {
        b.iter(|| {
            for &lever in &levers {
                circuit.use_component(lever, None);
            }
            for &lever in &levers {
                circuit.use_component(lever, None);
            }
            black_box(circuit.metrics().writes_applied);
        });
    });
}

/// Benchmark: Write 120 mixed components into an empty circuit.
fn bench_scattered_build(c: &mut Criterion) {
    let placements = scattered_profile(120, 42);

    c.bench_function("cascade_scattered_build", |b| {
        b.iter(|| {
            let circuit = build_circuit(&placements);
            black_box(circuit.state_hash());
        });
    });
}

/// Benchmark: Close a torch feedback loop and run it for 40 ticks.
fn bench_feedback_loop(c: &mut Criterion) {
    let placements = torch_feedback_loop(ComponentPos::new(7, 7));

    c.bench_function("cascade_feedback_loop_40_ticks", |b| {
        b.iter(|| {
            let mut circuit = Circuit::default();
            for &(pos, state) in &placements {
                circuit.set_component_state(pos, state, UpdateFlags::NOTIFY_ALL);
            }
            for _ in 0..40 {
                circuit.tick();
            }
            black_box(circuit.metrics().scheduled_ticks);
        });
    });
}

/// Benchmark: Build a torch-bearing scattered layout and tick it.
fn bench_scattered_ticks(c: &mut Criterion) {
    let placements = scattered_profile(120, 7);

    c.bench_function("cascade_scattered_ticks", |b| {
        b.iter(|| {
            let mut circuit = build_circuit(&placements);
            for _ in 0..20 {
                circuit.tick();
            }
            black_box(circuit.state_hash());
        });
    });
}

criterion_group!(
    benches,
    bench_bus_toggle,
    bench_scattered_build,
    bench_feedback_loop,
    bench_scattered_ticks
);
criterion_main!(benches);
