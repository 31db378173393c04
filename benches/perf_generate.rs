use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use stepviz::{catalog, Problem, SortAlgorithm};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_values(rng: &mut StdRng, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(-999..=999)).collect()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_generate_sorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_sort");
    for algorithm in SortAlgorithm::ALL {
        group.bench_function(format!("{algorithm:?}_256"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    Problem::Sort {
                        algorithm,
                        values: random_values(&mut rng, 256),
                    }
                },
                |problem| criterion::black_box(catalog::generate(&problem).len()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_generate_dp(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_dp");
    for &len in &[32usize, 64] {
        group.bench_function(format!("edit_distance_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    let mut word = || -> String {
                        (0..len)
                            .map(|_| ['A', 'C', 'G', 'T'][rng.gen_range(0..4)])
                            .collect()
                    };
                    Problem::EditDistance {
                        source: word(),
                        target: word(),
                    }
                },
                |problem| {
                    let before = rss_kib();
                    let trace = catalog::generate(&problem);
                    let after = rss_kib();
                    criterion::black_box(trace.len());
                    // memory delta to stderr, away from criterion's output
                    eprintln!(
                        "RSS KiB delta (edit distance {len}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate_sorts, bench_generate_dp);
criterion_main!(benches);
