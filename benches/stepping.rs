use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metacell::{CellState, Config, RuleTable, SeedPolicy, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Helpers
// ============================================================================

/// Rules under which a random grid keeps changing everywhere.
fn chaotic_rules() -> RuleTable {
    let mut rules = RuleTable::new();
    rules.randomize(&mut StdRng::seed_from_u64(7));
    rules
}

/// Rules under which a lone positive cell grows a small pattern and settles.
fn sparse_rules() -> RuleTable {
    let mut rules = RuleTable::new();
    for (state, sum_index, value) in [
        (1, 25, CellState::Positive),
        (2, 26, CellState::Negative),
        (0, 25, CellState::Neutral),
    ] {
        rules.set(state, sum_index, value).unwrap();
    }
    rules
}

fn sparse_simulation(threads: usize) -> Simulation {
    let config = Config::default()
        .with_rules(sparse_rules())
        .with_threads(threads);
    let mut sim = Simulation::new(config).unwrap();
    // Settle the cold start, then seed a little local activity
    sim.step().ok();
    for i in 0..8 {
        sim.set_cell(100 + i * 40, 200, CellState::Positive);
    }
    sim
}

// ============================================================================
// Sparse activity: the worklist stays small
// ============================================================================

fn bench_sparse_incremental(c: &mut Criterion) {
    c.bench_function("sparse_850x650_incremental", |b| {
        b.iter_batched(
            || sparse_simulation(1),
            |mut sim| black_box(sim.run(10)),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_sparse_full(c: &mut Criterion) {
    c.bench_function("sparse_850x650_full", |b| {
        b.iter_batched(
            || sparse_simulation(1),
            |mut sim| {
                for _ in 0..10 {
                    black_box(sim.step_full()).ok();
                }
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

// ============================================================================
// Dense activity: every cell is pending every generation
// ============================================================================

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_256x256");
    for threads in [1, 4] {
        let config = Config::new(256, 256)
            .with_seed(SeedPolicy::Random { seed: 1 })
            .with_rules(chaotic_rules())
            .with_threads(threads);
        let mut sim = Simulation::new(config).unwrap();

        group.bench_function(format!("{threads}_threads"), |b| {
            b.iter(|| black_box(sim.step()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sparse_incremental,
    bench_sparse_full,
    bench_dense
);
criterion_main!(benches);
