//! Criterion benchmarks for the particle container's destroy protocol.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use patchwork_bench::{particles_profile, scattered_kill_list};
use patchwork_core::DeleteMethod;
use patchwork_particles::PatchScope;

const PATCHES: u32 = 8;
const PER_PATCH: usize = 10_000;

/// Benchmark: 50 boundary-condition requests of 20 global indices each,
/// deferred and performed once vs. their union destroyed immediately.
fn bench_deferred_vs_immediate(c: &mut Criterion) {
    let total = PATCHES as usize * PER_PATCH;
    let kill = scattered_kill_list(total, 1_000, 11);
    let requests: Vec<Vec<i64>> = kill.chunks(20).map(<[i64]>::to_vec).collect();

    let mut group = c.benchmark_group("particles_1000_of_80k");
    group.bench_function("deferred", |b| {
        b.iter_batched(
            || particles_profile(PATCHES, PER_PATCH, DeleteMethod::BackFill).unwrap(),
            |mut particles| {
                for request in &requests {
                    particles
                        .deferred_destroy(request, PatchScope::Global)
                        .unwrap();
                }
                black_box(particles.perform_destroy(PatchScope::Global, true).unwrap());
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("immediate_union", |b| {
        b.iter_batched(
            || particles_profile(PATCHES, PER_PATCH, DeleteMethod::BackFill).unwrap(),
            |mut particles| {
                black_box(particles.destroy(&kill, PatchScope::Global, true).unwrap());
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

/// Benchmark: global create of 8K particles followed by renumber.
fn bench_global_create(c: &mut Criterion) {
    c.bench_function("global_create_8k", |b| {
        b.iter_batched(
            || particles_profile(PATCHES, PER_PATCH, DeleteMethod::BackFill).unwrap(),
            |mut particles| {
                black_box(particles.global_create(8_000, true).unwrap());
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_deferred_vs_immediate, bench_global_create);
criterion_main!(benches);
